//! Wire types for the exchange REST API.
//!
//! The v2 API answers with positional JSON arrays, not objects; each
//! response here carries a lenient `from_value` parser that picks the
//! indices it needs and tolerates trailing fields.

use crate::error::{ExchangeError, ExchangeResult};
use lender_core::{Amount, Period, Rate};
use serde_json::Value;

/// Platform operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStatus {
    Operative,
    Maintenance,
}

impl PlatformStatus {
    /// Parse `[1]` (operative) / `[0]` (maintenance).
    pub fn from_value(value: &Value) -> ExchangeResult<Self> {
        let code = value
            .get(0)
            .and_then(Value::as_i64)
            .ok_or_else(|| ExchangeError::Parse("platform status is not [0|1]".to_string()))?;
        Ok(if code == 1 {
            Self::Operative
        } else {
            Self::Maintenance
        })
    }

    pub fn is_operative(&self) -> bool {
        matches!(self, Self::Operative)
    }
}

/// One funding stats history record.
///
/// Wire row: `[MTS, _, _, FRR, AVG_PERIOD, AMOUNT, AMOUNT_USED, ...]`.
/// Only the timestamp and the flash return rate are of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingStatsEntry {
    /// Record timestamp, epoch milliseconds.
    pub mts: i64,
    /// Flash return rate (daily).
    pub frr: Rate,
}

impl FundingStatsEntry {
    pub fn from_value(row: &Value) -> ExchangeResult<Self> {
        let mts = row
            .get(0)
            .and_then(Value::as_i64)
            .ok_or_else(|| ExchangeError::Parse("funding stats row missing mts".to_string()))?;
        let frr = decimal_at(row, 3, "funding stats frr")?;
        Ok(Self {
            mts,
            frr: Rate::new(frr),
        })
    }
}

/// Exchange-side auto-renew setting for a currency.
///
/// Wire row: `[CURRENCY, PERIOD, RATE, THRESHOLD]`. A null response means
/// auto-renew is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRenewStatus {
    pub currency: String,
    pub period: Period,
    pub rate: Rate,
    pub amount: Amount,
}

impl AutoRenewStatus {
    pub fn from_value(row: &Value) -> ExchangeResult<Option<Self>> {
        if row.is_null() {
            return Ok(None);
        }
        let currency = row
            .get(0)
            .and_then(Value::as_str)
            .ok_or_else(|| ExchangeError::Parse("auto-renew row missing currency".to_string()))?
            .to_string();
        let period_days = row
            .get(1)
            .and_then(Value::as_u64)
            .ok_or_else(|| ExchangeError::Parse("auto-renew row missing period".to_string()))?;
        let period = Period::new(period_days as u16)?;
        let rate = Rate::new(decimal_at(row, 2, "auto-renew rate")?);
        let amount = Amount::new(decimal_at(row, 3, "auto-renew amount")?);
        Ok(Some(Self {
            currency,
            period,
            rate,
            amount,
        }))
    }
}

/// One resting funding offer, read back after submission.
///
/// Wire row: `[ID, SYMBOL, MTS_CREATED, MTS_UPDATED, AMOUNT, AMOUNT_ORIG,
/// TYPE, _, _, FLAGS, STATUS, _, _, _, RATE, PERIOD, ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveOffer {
    pub id: i64,
    pub symbol: String,
    pub amount: Amount,
    pub rate: Rate,
    pub period: Period,
}

impl ActiveOffer {
    pub fn from_value(row: &Value) -> ExchangeResult<Self> {
        let id = row
            .get(0)
            .and_then(Value::as_i64)
            .ok_or_else(|| ExchangeError::Parse("offer row missing id".to_string()))?;
        let symbol = row
            .get(1)
            .and_then(Value::as_str)
            .ok_or_else(|| ExchangeError::Parse("offer row missing symbol".to_string()))?
            .to_string();
        let amount = Amount::new(decimal_at(row, 4, "offer amount")?);
        let rate = Rate::new(decimal_at(row, 14, "offer rate")?);
        let period_days = row
            .get(15)
            .and_then(Value::as_u64)
            .ok_or_else(|| ExchangeError::Parse("offer row missing period".to_string()))?;
        let period = Period::new(period_days as u16)?;
        Ok(Self {
            id,
            symbol,
            amount,
            rate,
            period,
        })
    }
}

/// Pull a decimal out of a positional row, via the string representation
/// to keep the exact wire precision.
pub(crate) fn decimal_at(
    row: &Value,
    idx: usize,
    what: &str,
) -> ExchangeResult<rust_decimal::Decimal> {
    let cell = row
        .get(idx)
        .ok_or_else(|| ExchangeError::Parse(format!("{what}: index {idx} missing")))?;
    let text = match cell {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => {
            return Err(ExchangeError::Parse(format!(
                "{what}: unexpected value {other}"
            )))
        }
    };
    text.parse()
        .map_err(|e| ExchangeError::Parse(format!("{what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_platform_status() {
        assert!(PlatformStatus::from_value(&json!([1]))
            .unwrap()
            .is_operative());
        assert!(!PlatformStatus::from_value(&json!([0]))
            .unwrap()
            .is_operative());
        assert!(PlatformStatus::from_value(&json!({})).is_err());
    }

    #[test]
    fn test_funding_stats_row() {
        let row = json!([1700000000000_i64, null, null, 0.00021, 30, 1.5e8, 9.1e7]);
        let entry = FundingStatsEntry::from_value(&row).unwrap();
        assert_eq!(entry.mts, 1700000000000);
        assert_eq!(entry.frr, Rate::new(dec!(0.00021)));
    }

    #[test]
    fn test_auto_renew_null_means_off() {
        assert_eq!(AutoRenewStatus::from_value(&json!(null)).unwrap(), None);
    }

    #[test]
    fn test_auto_renew_row() {
        let row = json!(["USD", 30, 0.0003, 1000]);
        let status = AutoRenewStatus::from_value(&row).unwrap().unwrap();
        assert_eq!(status.currency, "USD");
        assert_eq!(status.period.days(), 30);
        assert_eq!(status.rate, Rate::new(dec!(0.0003)));
    }

    #[test]
    fn test_active_offer_row() {
        let row = json!([
            123456, "fUSD", 1700000000000_i64, 1700000000000_i64, 500.25, 500.25, "LIMIT",
            null, null, 0, "ACTIVE", null, null, null, 0.00042, 30
        ]);
        let offer = ActiveOffer::from_value(&row).unwrap();
        assert_eq!(offer.id, 123456);
        assert_eq!(offer.symbol, "fUSD");
        assert_eq!(offer.amount, Amount::new(dec!(500.25)));
        assert_eq!(offer.rate, Rate::new(dec!(0.00042)));
        assert_eq!(offer.period.days(), 30);
    }

    #[test]
    fn test_decimal_at_accepts_strings_and_numbers() {
        let row = json!(["0.001", 0.002]);
        assert_eq!(decimal_at(&row, 0, "x").unwrap(), dec!(0.001));
        assert_eq!(decimal_at(&row, 1, "x").unwrap(), dec!(0.002));
        assert!(decimal_at(&row, 2, "x").is_err());
    }
}
