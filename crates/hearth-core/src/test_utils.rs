//! Test utilities for hearth-core
//!
//! This module provides a mock OpenAI-compatible server that can be used for
//! development and integration tests of the summarizer backend.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tokio::sync::oneshot;

/// How the mock server answers chat completion requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockServerMode {
    /// A well-formed summary
    Ok,
    /// A completion whose content isn't a summary
    Malformed,
    /// HTTP 401
    Unauthorized,
    /// HTTP 429
    RateLimited,
    /// HTTP 503
    Unavailable,
    /// A well-formed summary after a delay
    Slow(Duration),
}

/// Mock OpenAI-compatible server for testing and development
pub struct MockSummaryServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockSummaryServer {
    /// Start a server that answers successfully
    pub async fn start() -> Self {
        Self::start_with(MockServerMode::Ok).await
    }

    /// Start the mock server on an available port
    pub async fn start_with(mode: MockServerMode) -> Self {
        let app = Router::new()
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(mode);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockSummaryServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Chat completions endpoint
async fn handle_chat(
    State(mode): State<MockServerMode>,
    Json(request): Json<serde_json::Value>,
) -> Response {
    let model = request["model"].as_str().unwrap_or("mock-model").to_string();

    match mode {
        MockServerMode::Ok => completion(&model, &summary_content(&request)),
        MockServerMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            completion(&model, &summary_content(&request))
        }
        MockServerMode::Malformed => completion(&model, "Sorry, I can't help with budgets."),
        MockServerMode::Unauthorized => error(StatusCode::UNAUTHORIZED, "invalid_api_key"),
        MockServerMode::RateLimited => error(StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded"),
        MockServerMode::Unavailable => error(StatusCode::SERVICE_UNAVAILABLE, "overloaded"),
    }
}

/// Summary JSON wrapped in prose, the way chat models tend to answer
fn summary_content(request: &serde_json::Value) -> String {
    let user_message = request["messages"]
        .as_array()
        .and_then(|messages| messages.iter().find(|m| m["role"] == "user"))
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default();
    let deficit = user_message.contains("Free cash flow is -");

    let summary = json!({
        "summary": "Spending is under control this month.",
        "highlights": ["Rent paid on time"],
        "recommendations": ["Keep building the emergency fund"],
        "trend": if deficit { "concerning" } else { "improving" },
    });
    format!("Here is the summary:\n{}\nLet me know if you need more.", summary)
}

fn completion(model: &str, content: &str) -> Response {
    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

fn error(status: StatusCode, code: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "message": "mock failure", "code": code } })),
    )
        .into_response()
}
