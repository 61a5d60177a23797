//! Application configuration.

use crate::error::{AppError, AppResult};
use lender_core::{Period, Rate};
use lender_strategy::{FloorTable, StrategyConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Application configuration.
///
/// Period floors live under `[periods]` as `"<days>" = <rate>` entries
/// (TOML keys are strings). Credentials are never read from here, only
/// from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Currency to lend, e.g. "USD".
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Total capital to deploy per cycle. Zero means "full available
    /// balance", resolved exchange-side.
    #[serde(default)]
    pub amount: Decimal,
    /// Funding book snapshot depth (rows per side). Default: 250.
    #[serde(default = "default_book_len")]
    pub book_len: u32,
    /// Seconds between planning cycles. Default: 3600 (1 hour).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Delay between offer submissions (ms), respecting exchange rate
    /// limits. Default: 120.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    /// Delay before reading back resting offers (ms). Default: 1000.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Planner and quoter tuning.
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Period -> floor rate mapping, keyed by day count.
    #[serde(default)]
    pub periods: BTreeMap<String, Decimal>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_book_len() -> u32 {
    250
}

fn default_interval_secs() -> u64 {
    3600
}

fn default_submit_delay_ms() -> u64 {
    120
}

fn default_settle_delay_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            amount: Decimal::ZERO,
            book_len: default_book_len(),
            interval_secs: default_interval_secs(),
            submit_delay_ms: default_submit_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            strategy: StrategyConfig::default(),
            periods: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `LENDER_CONFIG` or the default path.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("LENDER_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all parameters and cross-checks.
    ///
    /// An empty `[periods]` table is allowed here; the cycle then fails
    /// with the empty-market error and is skipped, which keeps "nothing
    /// to rank" a runtime condition rather than a load failure.
    pub fn validate(&self) -> AppResult<()> {
        if self.currency.is_empty() {
            return Err(AppError::Config("currency must not be empty".to_string()));
        }
        if self.amount < Decimal::ZERO {
            return Err(AppError::Config(format!(
                "amount must be non-negative, got {}",
                self.amount
            )));
        }
        if self.book_len == 0 {
            return Err(AppError::Config("book_len must be positive".to_string()));
        }
        self.strategy.validate()?;

        // Build and bound-check the floor table once to surface bad
        // periods and inverted floors at load time.
        let floors = self.floor_table()?;
        floors.validate_against_cap(self.strategy.rate_max)?;
        Ok(())
    }

    /// Resolve `[periods]` into an immutable floor table, with
    /// `strategy.rate_min` as the default floor for unmapped periods.
    pub fn floor_table(&self) -> AppResult<FloorTable> {
        let mut floors = BTreeMap::new();
        for (key, &rate) in &self.periods {
            let days: u16 = key.parse().map_err(|_| {
                AppError::Config(format!("period key {key:?} is not a day count"))
            })?;
            let period = Period::new(days)?;
            floors.insert(period, Rate::new(rate));
        }
        Ok(FloorTable::new(floors, self.strategy.rate_min)?)
    }
}
