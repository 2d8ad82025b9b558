//! Mock backend for testing
//!
//! Returns a canned summary, or fails in a configured way, optionally after
//! a delay. Useful for unit tests and development without a running model.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::parsing::parse_summary;
use super::types::{AiSummary, FinancialSnapshot, Trend};
use super::SummaryBackend;

/// How a mock backend fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Unauthorized,
    RateLimited,
    /// Returns text that isn't a summary
    Malformed,
    Unavailable,
}

/// Mock summarizer backend
#[derive(Debug, Clone)]
pub struct MockBackend {
    failure: Option<MockFailure>,
    delay: Option<Duration>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend that always succeeds
    pub fn new() -> Self {
        Self {
            failure: None,
            delay: None,
        }
    }

    /// Create a mock backend whose summaries always fail
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            delay: None,
        }
    }

    /// Wait before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl SummaryBackend for MockBackend {
    async fn summarize(&self, snapshot: &FinancialSnapshot) -> Result<AiSummary> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.failure {
            Some(MockFailure::Unauthorized) => {
                Err(Error::AiUnauthorized("mock: invalid API key".into()))
            }
            Some(MockFailure::RateLimited) => Err(Error::AiRateLimited("mock: slow down".into())),
            Some(MockFailure::Malformed) => parse_summary("I'm not sure how to answer that."),
            Some(MockFailure::Unavailable) => {
                Err(Error::AiUnavailable("mock: service down".into()))
            }
            None => Ok(canned_summary(snapshot)),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

fn canned_summary(snapshot: &FinancialSnapshot) -> AiSummary {
    let trend = if snapshot.free_cash_flow < 0.0 {
        Trend::Concerning
    } else if snapshot.month_over_month_change > 0.0 {
        Trend::Stable
    } else {
        Trend::Improving
    };

    AiSummary {
        summary: format!(
            "Mock summary for {}: free cash flow {:.2}.",
            snapshot.month, snapshot.free_cash_flow
        ),
        highlights: vec![format!("Savings rate {:.1}%", snapshot.savings_rate)],
        recommendations: vec!["Keep tracking expenses".to_string()],
        trend,
    }
}
