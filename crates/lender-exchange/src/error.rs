//! Error types for lender-exchange.

use thiserror::Error;

/// Exchange client error types.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Failed to parse exchange response: {0}")]
    Parse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Core error: {0}")]
    Core(#[from] lender_core::CoreError),
}

/// Result type alias for exchange operations.
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
