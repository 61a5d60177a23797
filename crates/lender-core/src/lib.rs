//! Core domain types for the funding offer bot.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Rate`, `Amount`: precision-safe numeric types
//! - `Period`: bounded lending duration in days
//! - `BookRow`, `PeriodStat`: funding book snapshot and per-period summary
//! - `AllocationEntry`, `FundingOffer`: planner and quoter outputs

pub mod book;
pub mod decimal;
pub mod error;
pub mod offer;
pub mod period;

pub use book::{BookRow, PeriodStat};
pub use decimal::{Amount, Rate};
pub use error::{CoreError, Result};
pub use offer::{AllocationEntry, FundingOffer, OfferType};
pub use period::Period;
