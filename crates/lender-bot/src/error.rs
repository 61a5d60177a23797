//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] lender_core::CoreError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] lender_strategy::StrategyError),

    #[error("Exchange error: {0}")]
    Exchange(#[from] lender_exchange::ExchangeError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] lender_telemetry::TelemetryError),

    #[error("Cycle error: {0}")]
    Cycle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
