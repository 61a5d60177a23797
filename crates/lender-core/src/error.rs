//! Error types for lender-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid period: {0} (must be {min}..={max} days)", min = crate::period::Period::MIN_DAYS, max = crate::period::Period::MAX_DAYS)]
    InvalidPeriod(u16),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
