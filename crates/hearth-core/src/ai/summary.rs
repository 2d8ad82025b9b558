//! Narrative summary with a local fallback
//!
//! The AI summary is optional. Any failure (no backend, bad credentials,
//! rate limiting, garbage output, outage or timeout) yields a summary built
//! locally from free cash flow and budget status instead of an error.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Error;

use super::types::{
    AiSummary, FallbackReason, FinancialSnapshot, NarrativeOutcome, NarrativeSource, Trend,
};
use super::{AIClient, SummaryBackend};

/// Savings rate (percent) called out as a highlight in the local summary
const HEALTHY_SAVINGS_RATE_PCT: f64 = 20.0;

/// Summary derived only from the sign of free cash flow and over-budget status
pub fn local_summary(snapshot: &FinancialSnapshot) -> AiSummary {
    let over_budget: Vec<_> = snapshot.over_budget().collect();
    let fcf = snapshot.free_cash_flow;

    let trend = if fcf < 0.0 {
        Trend::Concerning
    } else if fcf > 0.0 && over_budget.is_empty() {
        Trend::Improving
    } else {
        Trend::Stable
    };

    let summary = if fcf >= 0.0 {
        format!(
            "{}: {:.2} left after obligations and expenses, a savings rate of {:.1}%.",
            snapshot.month, fcf, snapshot.savings_rate
        )
    } else {
        format!(
            "{}: spending exceeded income by {:.2}.",
            snapshot.month,
            fcf.abs()
        )
    };

    let mut highlights = Vec::new();
    if fcf >= 0.0 {
        highlights.push(format!("Free cash flow of {:.2}", fcf));
    }
    if snapshot.savings_rate >= HEALTHY_SAVINGS_RATE_PCT {
        highlights.push(format!("Saving {:.1}% of income", snapshot.savings_rate));
    }
    if over_budget.is_empty() && !snapshot.budgets.is_empty() {
        highlights.push("All budgets within their limits".to_string());
    }

    let mut recommendations: Vec<String> = over_budget
        .iter()
        .map(|b| {
            format!(
                "Rein in {} spending: {:.2} against a {:.2} budget",
                b.category.label(),
                b.spent,
                b.limit
            )
        })
        .collect();
    if fcf < 0.0 {
        recommendations.push(format!(
            "Review variable costs ({:.2}) to close the gap",
            snapshot.variable_costs
        ));
    } else if recommendations.is_empty() {
        recommendations
            .push("Put part of the surplus toward savings or extra debt payments".to_string());
    }

    AiSummary {
        summary,
        highlights,
        recommendations,
        trend,
    }
}

/// Which fallback a summarizer error corresponds to
pub fn fallback_reason(error: &Error) -> FallbackReason {
    match error {
        Error::AiUnauthorized(_) => FallbackReason::Unauthorized,
        Error::AiRateLimited(_) => FallbackReason::RateLimited,
        Error::AiTimeout(_) => FallbackReason::Timeout,
        Error::InvalidData(_) | Error::Json(_) => FallbackReason::Malformed,
        _ => FallbackReason::Unavailable,
    }
}

/// Ask the AI backend for a summary, bounded by `timeout`, falling back to
/// the local summary on any failure.
///
/// Dropping the returned future abandons the in-flight request.
pub async fn summarize_or_fallback(
    client: Option<&AIClient>,
    snapshot: &FinancialSnapshot,
    timeout: Duration,
) -> NarrativeOutcome {
    let Some(client) = client else {
        debug!("No AI backend configured, using local summary");
        return fallback(snapshot, FallbackReason::NotConfigured);
    };

    match tokio::time::timeout(timeout, client.summarize(snapshot)).await {
        Ok(Ok(summary)) => {
            debug!(model = client.model(), month = %snapshot.month, "AI summary received");
            NarrativeOutcome {
                summary,
                source: NarrativeSource::Ai {
                    model: client.model().to_string(),
                },
            }
        }
        Ok(Err(e)) => {
            let reason = fallback_reason(&e);
            warn!(
                error = %e,
                reason = reason.as_str(),
                host = client.host(),
                "AI summary failed, using local summary"
            );
            fallback(snapshot, reason)
        }
        Err(_) => {
            let e = Error::AiTimeout(timeout.as_secs());
            warn!(error = %e, host = client.host(), "AI summary timed out, using local summary");
            fallback(snapshot, FallbackReason::Timeout)
        }
    }
}

fn fallback(snapshot: &FinancialSnapshot, reason: FallbackReason) -> NarrativeOutcome {
    NarrativeOutcome {
        summary: local_summary(snapshot),
        source: NarrativeSource::Fallback { reason },
    }
}
