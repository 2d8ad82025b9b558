//! Pluggable AI summarizer
//!
//! The summarizer turns a structured `FinancialSnapshot` into a short
//! narrative. It is an optional enrichment layered over the deterministic
//! analytics: callers await it separately, and every failure degrades to
//! `local_summary`.
//!
//! # Architecture
//!
//! - `SummaryBackend` trait: defines the interface for all backends
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (openai_compatible, mock). Default: openai_compatible
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (required for openai_compatible backend)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name (default: gpt-4o-mini)
//! - `OPENAI_COMPATIBLE_API_KEY`: API key if required (optional)

mod mock;
mod openai_compatible;
pub mod parsing;
pub mod summary;
pub mod types;

pub use mock::{MockBackend, MockFailure};
pub use openai_compatible::OpenAICompatibleBackend;
pub use summary::{fallback_reason, local_summary, summarize_or_fallback};
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all summarizer backends
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Summarize a month's finances
    async fn summarize(&self, snapshot: &FinancialSnapshot) -> Result<AiSummary>;

    /// Get the model name (for logging and provenance)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible chat completions server
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `openai_compatible` (default): Uses OPENAI_COMPATIBLE_HOST and OPENAI_COMPATIBLE_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("AI_BACKEND").unwrap_or_else(|_| "openai_compatible".to_string());

        match backend.to_lowercase().as_str() {
            "openai_compatible" | "openai" => {
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(
                    backend = %backend,
                    "Unknown AI_BACKEND, falling back to openai_compatible"
                );
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
        }
    }

    /// Create an OpenAI-compatible backend directly
    pub fn openai_compatible(host: &str, model: &str) -> Self {
        AIClient::OpenAICompatible(OpenAICompatibleBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

// Implement SummaryBackend for AIClient by delegating to the inner backend
#[async_trait]
impl SummaryBackend for AIClient {
    async fn summarize(&self, snapshot: &FinancialSnapshot) -> Result<AiSummary> {
        match self {
            AIClient::OpenAICompatible(b) => b.summarize(snapshot).await,
            AIClient::Mock(b) => b.summarize(snapshot).await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
