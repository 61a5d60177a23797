//! Offer allocation and rate quoting for the funding offer bot.
//!
//! Three pure, synchronous components, invoked in sequence each cycle:
//! - `aggregate`: raw funding book snapshot -> per-period summary stats
//! - `plan`: stats + split count -> ranked round-robin slot allocation
//! - `quote_rate`: one bounded interest rate per allocated period
//!
//! All three are deterministic functions of their inputs with no shared
//! state, safe to call from any thread.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod floors;
pub mod planner;
pub mod quoter;

pub use aggregator::aggregate;
pub use config::StrategyConfig;
pub use error::{StrategyError, StrategyResult};
pub use floors::{FloorTable, DEFAULT_FLOOR};
pub use planner::plan;
pub use quoter::quote_rate;
