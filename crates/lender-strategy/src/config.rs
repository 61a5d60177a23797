//! Strategy configuration.

use crate::error::{StrategyError, StrategyResult};
use crate::floors::DEFAULT_FLOOR;
use lender_core::Rate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Upper bound on the split count, to prevent unbounded offer spam.
pub const MAX_SPLIT: u32 = 20;

/// Tuning knobs for the planner and quoter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// How many separate offers to place per cycle (1..=20). Default: 3.
    #[serde(default = "default_split")]
    pub split: u32,
    /// Attractiveness exponent on the rate/floor ratio. Default: 0.5.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Quote blend weight towards the observed book maximum, in (0, 1].
    /// Default: 0.4.
    #[serde(default = "default_beta")]
    pub beta: Decimal,
    /// Default floor for periods without a configured one. Default: 0.0002.
    #[serde(default = "default_rate_min")]
    pub rate_min: Rate,
    /// Rate ceiling for every quote. Default: 0.01.
    #[serde(default = "default_rate_max")]
    pub rate_max: Rate,
}

fn default_split() -> u32 {
    3
}

fn default_alpha() -> f64 {
    0.5
}

fn default_beta() -> Decimal {
    dec!(0.4)
}

fn default_rate_min() -> Rate {
    Rate(dec!(0.0002))
}

fn default_rate_max() -> Rate {
    Rate(dec!(0.01))
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            split: default_split(),
            alpha: default_alpha(),
            beta: default_beta(),
            rate_min: default_rate_min(),
            rate_max: default_rate_max(),
        }
    }
}

impl StrategyConfig {
    /// Validate parameter ranges. Run once at load; the planner and
    /// quoter assume a validated config.
    pub fn validate(&self) -> StrategyResult<()> {
        if self.split == 0 || self.split > MAX_SPLIT {
            return Err(StrategyError::InvalidConfig(format!(
                "split must be 1..={MAX_SPLIT}, got {}",
                self.split
            )));
        }
        if !(self.alpha > 0.0 && self.alpha.is_finite()) {
            return Err(StrategyError::InvalidConfig(format!(
                "alpha must be a positive finite number, got {}",
                self.alpha
            )));
        }
        if self.beta <= Decimal::ZERO || self.beta > Decimal::ONE {
            return Err(StrategyError::InvalidConfig(format!(
                "beta must be in (0, 1], got {}",
                self.beta
            )));
        }
        if self.rate_min < DEFAULT_FLOOR {
            return Err(StrategyError::InvalidConfig(format!(
                "rate_min must be at least {DEFAULT_FLOOR}, got {}",
                self.rate_min
            )));
        }
        if self.rate_max < self.rate_min {
            return Err(StrategyError::InvalidConfig(format!(
                "rate_max {} is below rate_min {}",
                self.rate_max, self.rate_min
            )));
        }
        Ok(())
    }
}
