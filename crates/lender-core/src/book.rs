//! Funding book snapshot types.

use crate::decimal::{Amount, Rate};
use crate::period::Period;
use serde::{Deserialize, Serialize};

/// One row of a raw funding book snapshot.
///
/// The amount is signed on the wire (negative for the offer side);
/// aggregation only looks at the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    pub rate: Rate,
    pub period: Period,
    pub amount: Amount,
}

impl BookRow {
    pub fn new(rate: Rate, period: Period, amount: Amount) -> Self {
        Self {
            rate,
            period,
            amount,
        }
    }
}

/// Per-period summary of one funding book snapshot.
///
/// Computed fresh each planning cycle and discarded afterwards. A period
/// with no matching book rows has the zero stat (thin books are a normal
/// market condition, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStat {
    /// Period this stat summarizes.
    pub period: Period,
    /// Sum of absolute row amounts.
    pub volume: Amount,
    /// Volume-weighted average rate, zero when volume is zero.
    pub rate_vwap: Rate,
    /// Highest observed rate, zero when there are no rows.
    pub rate_max: Rate,
}

impl PeriodStat {
    /// The zero stat for a period with no book rows.
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            volume: Amount::ZERO,
            rate_vwap: Rate::ZERO,
            rate_max: Rate::ZERO,
        }
    }

    /// Whether any volume was observed at this period.
    pub fn has_volume(&self) -> bool {
        !self.volume.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stat() {
        let stat = PeriodStat::empty(Period::new(30).unwrap());
        assert!(!stat.has_volume());
        assert_eq!(stat.rate_vwap, Rate::ZERO);
        assert_eq!(stat.rate_max, Rate::ZERO);
    }
}
