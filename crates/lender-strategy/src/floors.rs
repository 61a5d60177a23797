//! Per-period floor rate resolution.
//!
//! Configuration supplies a period -> minimum rate mapping; periods
//! absent from it fall back to a global default. The table is built once
//! per run and never mutated, so floor resolution is a pure lookup.

use crate::error::{StrategyError, StrategyResult};
use lender_core::{Period, Rate};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Global default floor: 0.0001/day, i.e. 3.65% APR.
pub const DEFAULT_FLOOR: Rate = Rate(dec!(0.0001));

/// Immutable period -> floor rate table.
#[derive(Debug, Clone)]
pub struct FloorTable {
    floors: BTreeMap<Period, Rate>,
    default_floor: Rate,
}

impl FloorTable {
    /// Build a table with an explicit default floor.
    ///
    /// Every configured floor (and the default) must be positive.
    pub fn new(floors: BTreeMap<Period, Rate>, default_floor: Rate) -> StrategyResult<Self> {
        if !default_floor.is_positive() {
            return Err(StrategyError::InvalidConfig(format!(
                "default floor must be positive, got {default_floor}"
            )));
        }
        for (period, floor) in &floors {
            if !floor.is_positive() {
                return Err(StrategyError::InvalidConfig(format!(
                    "floor for period {period} must be positive, got {floor}"
                )));
            }
        }
        Ok(Self {
            floors,
            default_floor,
        })
    }

    /// Build a table using [`DEFAULT_FLOOR`] for unmapped periods.
    pub fn with_default_floor(floors: BTreeMap<Period, Rate>) -> StrategyResult<Self> {
        Self::new(floors, DEFAULT_FLOOR)
    }

    /// Resolve the floor rate for a period.
    #[inline]
    pub fn resolve(&self, period: Period) -> Rate {
        self.floors
            .get(&period)
            .copied()
            .unwrap_or(self.default_floor)
    }

    /// Fail if any resolvable floor exceeds the rate ceiling.
    ///
    /// Run once at config load so the quoter never sees inverted bounds
    /// mid-cycle.
    pub fn validate_against_cap(&self, cap: Rate) -> StrategyResult<()> {
        if self.default_floor > cap {
            return Err(StrategyError::InvalidBounds {
                period: Period::MIN,
                floor: self.default_floor,
                cap,
            });
        }
        for (&period, &floor) in &self.floors {
            if floor > cap {
                return Err(StrategyError::InvalidBounds { period, floor, cap });
            }
        }
        Ok(())
    }

    /// Configured periods of interest, ascending.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.floors.keys().copied()
    }

    /// Whether any periods are configured.
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Map a target rate to the longest period whose floor it clears.
    ///
    /// Scans configured periods from longest to shortest and returns the
    /// first whose floor the target meets; falls back to the shortest
    /// valid period.
    pub fn rate_to_period(&self, target: Rate) -> Period {
        self.floors
            .iter()
            .rev()
            .find(|(_, &floor)| target >= floor)
            .map(|(&period, _)| period)
            .unwrap_or(Period::MIN)
    }
}
