//! Planner and quoter output types.

use crate::decimal::{Amount, Rate};
use crate::period::Period;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of offer slots assigned to a period.
///
/// The planner never emits an entry with `count == 0`; a period that
/// received no slots is simply absent from the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub period: Period,
    pub count: u32,
}

impl AllocationEntry {
    pub fn new(period: Period, count: u32) -> Self {
        debug_assert!(count > 0, "planner must not emit zero-count entries");
        Self { period, count }
    }
}

/// Offer placement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OfferType {
    #[default]
    Limit,
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferType::Limit => write!(f, "LIMIT"),
        }
    }
}

/// One funding offer ready for submission.
///
/// Every slot sharing the same period within one cycle carries the same
/// rate (quoted once per period, not once per slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingOffer {
    pub offer_type: OfferType,
    /// Funding symbol, e.g. "fUSD".
    pub symbol: String,
    pub period: Period,
    pub rate: Rate,
    /// Per-slot amount. Zero means "full available balance", resolved
    /// exchange-side.
    pub amount: Amount,
}

impl FundingOffer {
    pub fn new(symbol: impl Into<String>, period: Period, rate: Rate, amount: Amount) -> Self {
        Self {
            offer_type: OfferType::Limit,
            symbol: symbol.into(),
            period,
            rate,
            amount,
        }
    }
}
