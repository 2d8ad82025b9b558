//! OpenAI-compatible summarizer backend
//!
//! Works with any server that implements the OpenAI chat completions API
//! (hosted OpenAI, vLLM, LocalAI, llama-server and similar).
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (required)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name (default: gpt-4o-mini)
//! - `OPENAI_COMPATIBLE_API_KEY`: API key if required (optional)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prompts::{PromptId, PromptLibrary};

use super::parsing::parse_summary;
use super::types::{summary_schema, AiSummary, FinancialSnapshot};
use super::SummaryBackend;

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// OpenAI-compatible backend
#[derive(Clone)]
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl OpenAICompatibleBackend {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            prompts: Arc::new(RwLock::new(PromptLibrary::new())),
        }
    }

    pub fn with_api_key(base_url: &str, model: &str, api_key: &str) -> Self {
        let mut backend = Self::new(base_url, model);
        backend.api_key = Some(api_key.to_string());
        backend
    }

    /// Use a specific prompt library instead of the default override paths
    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = Arc::new(RwLock::new(prompts));
        self
    }

    /// Create from environment variables
    ///
    /// Required: `OPENAI_COMPATIBLE_HOST`
    /// Optional: `OPENAI_COMPATIBLE_MODEL`, `OPENAI_COMPATIBLE_API_KEY`
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OPENAI_COMPATIBLE_HOST").ok()?;
        let model =
            std::env::var("OPENAI_COMPATIBLE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let mut backend = Self::new(&host, &model);
        backend.api_key = std::env::var("OPENAI_COMPATIBLE_API_KEY").ok();
        Some(backend)
    }

    /// Render the system and user messages for a snapshot
    fn build_messages(&self, snapshot: &FinancialSnapshot) -> Result<Vec<ChatMessage>> {
        let snapshot_json = serde_json::to_string_pretty(snapshot)?;
        let schema = summary_schema().to_string();
        let month = snapshot.month.to_string();
        let free_cash_flow = format!("{:.2}", snapshot.free_cash_flow);
        let total_income = format!("{:.2}", snapshot.total_income);
        let savings_rate = format!("{:.1}", snapshot.savings_rate);
        let over_budget = snapshot
            .over_budget()
            .map(|b| b.category.label())
            .collect::<Vec<_>>()
            .join(", ");

        let mut vars = HashMap::new();
        vars.insert("month", month.as_str());
        vars.insert("free_cash_flow", free_cash_flow.as_str());
        vars.insert("total_income", total_income.as_str());
        vars.insert("savings_rate", savings_rate.as_str());
        vars.insert("over_budget", over_budget.as_str());
        vars.insert("snapshot", snapshot_json.as_str());
        vars.insert("schema", schema.as_str());

        let mut prompts = self
            .prompts
            .write()
            .map_err(|_| Error::InvalidData("Failed to acquire prompt library lock".into()))?;
        let template = prompts.get(PromptId::SummarizeFinances)?;

        Ok(vec![
            ChatMessage {
                role: "system".to_string(),
                content: template.render_system(&vars),
            },
            ChatMessage {
                role: "user".to_string(),
                content: template.render_user(&vars),
            },
        ])
    }

    /// Make a chat completion request and return the first choice's content
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.2),
            max_tokens: None,
            stream: false,
        };

        let mut req_builder = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.bearer_auth(api_key);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| Error::AiUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::AiUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let chat_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::InvalidData(format!("Invalid chat completion response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::InvalidData("No choices in chat completion response".into()))
    }
}

/// Map a non-success HTTP status to the matching summarizer error
fn status_error(status: StatusCode, body: &str) -> Error {
    let body: String = body.chars().take(MAX_ERROR_BODY).collect();
    let detail = format!("{}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AiUnauthorized(detail),
        StatusCode::TOO_MANY_REQUESTS => Error::AiRateLimited(detail),
        _ => Error::AiUnavailable(detail),
    }
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl SummaryBackend for OpenAICompatibleBackend {
    async fn summarize(&self, snapshot: &FinancialSnapshot) -> Result<AiSummary> {
        let messages = self.build_messages(snapshot)?;
        let response = self.chat_completion(messages).await?;
        debug!(model = %self.model, "OpenAI-compatible summary response: {}", response);

        parse_summary(&response)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
