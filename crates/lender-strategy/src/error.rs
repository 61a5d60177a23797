//! Error types for lender-strategy.

use lender_core::{Period, Rate};
use thiserror::Error;

/// Strategy error types.
///
/// `EmptyMarket` and `InvalidBounds` always abort the whole planning
/// cycle before any submission; no partial plan is ever returned.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Planner invoked with no period statistics at all.
    #[error("Funding book yielded no period statistics to rank")]
    EmptyMarket,

    /// A period's floor rate exceeds the configured ceiling.
    #[error("Floor rate {floor} for period {period} exceeds cap {cap}")]
    InvalidBounds {
        period: Period,
        floor: Rate,
        cap: Rate,
    },

    /// Configuration parameter out of range.
    #[error("Invalid strategy config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for strategy operations.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;
