//! Error types for Hearth

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid month key '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Payment of {payment:.2} does not cover monthly interest of {monthly_interest:.2}")]
    NonAmortizing { monthly_interest: f64, payment: f64 },

    #[error("AI service rejected credentials: {0}")]
    AiUnauthorized(String),

    #[error("AI service rate limited the request: {0}")]
    AiRateLimited(String),

    #[error("AI service unavailable: {0}")]
    AiUnavailable(String),

    #[error("AI request timed out after {0} seconds")]
    AiTimeout(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
