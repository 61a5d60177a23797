//! Market stats aggregation.
//!
//! Reduces a raw funding book snapshot into per-period summary statistics.
//! All accumulation is exact decimal arithmetic, so two passes over the
//! same snapshot yield bit-identical stats.

use lender_core::{Amount, BookRow, Period, PeriodStat, Rate};
use std::collections::BTreeMap;

/// Aggregate book rows into per-period stats.
///
/// Rows for periods outside `periods` are ignored. Every requested period
/// gets an entry; a period with no matching rows keeps the zero stat.
/// Malformed or empty input never fails here, so the planner always has a
/// value to rank.
pub fn aggregate(rows: &[BookRow], periods: &[Period]) -> BTreeMap<Period, PeriodStat> {
    let mut acc: BTreeMap<Period, RunningStat> = periods
        .iter()
        .map(|&p| (p, RunningStat::default()))
        .collect();

    for row in rows {
        let Some(stat) = acc.get_mut(&row.period) else {
            continue;
        };
        let amount = row.amount.abs();
        stat.volume = stat.volume + amount;
        stat.rate_sum = stat.rate_sum + row.rate.inner() * amount.inner();
        stat.rate_max = stat.rate_max.max(row.rate);
    }

    acc.into_iter()
        .map(|(period, s)| (period, s.finish(period)))
        .collect()
}

/// Accumulator state for one period.
#[derive(Debug, Default, Clone, Copy)]
struct RunningStat {
    volume: Amount,
    rate_sum: rust_decimal::Decimal,
    rate_max: Rate,
}

impl RunningStat {
    fn finish(self, period: Period) -> PeriodStat {
        let rate_vwap = if self.volume.is_zero() {
            Rate::ZERO
        } else {
            Rate::new(self.rate_sum / self.volume.inner())
        };
        PeriodStat {
            period,
            volume: self.volume,
            rate_vwap,
            rate_max: self.rate_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn p(days: u16) -> Period {
        Period::new(days).unwrap()
    }

    fn row(rate: &str, period: u16, amount: &str) -> BookRow {
        BookRow::new(
            rate.parse().unwrap(),
            p(period),
            amount.parse().unwrap(),
        )
    }

    #[test]
    fn test_vwap_and_max() {
        let rows = vec![row("0.001", 30, "100"), row("0.002", 30, "300")];
        let stats = aggregate(&rows, &[p(30)]);

        let stat = &stats[&p(30)];
        assert_eq!(stat.volume, Amount::new(dec!(400)));
        // (0.001*100 + 0.002*300) / 400
        assert_eq!(stat.rate_vwap, Rate::new(dec!(0.00175)));
        assert_eq!(stat.rate_max, Rate::new(dec!(0.002)));
    }

    #[test]
    fn test_negative_amounts_counted_by_magnitude() {
        let rows = vec![row("0.001", 30, "-100"), row("0.002", 30, "300")];
        let stats = aggregate(&rows, &[p(30)]);
        assert_eq!(stats[&p(30)].volume, Amount::new(dec!(400)));
    }

    #[test]
    fn test_unrequested_periods_ignored() {
        let rows = vec![row("0.001", 30, "100"), row("0.005", 60, "999")];
        let stats = aggregate(&rows, &[p(30)]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[&p(30)].rate_max, Rate::new(dec!(0.001)));
    }

    #[test]
    fn test_period_with_no_rows_gets_zero_stat() {
        let rows = vec![row("0.001", 30, "100")];
        let stats = aggregate(&rows, &[p(2), p(30)]);
        assert_eq!(stats[&p(2)], PeriodStat::empty(p(2)));
    }

    #[test]
    fn test_empty_snapshot() {
        let stats = aggregate(&[], &[p(2), p(30)]);
        assert_eq!(stats.len(), 2);
        assert!(stats.values().all(|s| !s.has_volume()));
    }

    #[test]
    fn test_idempotent() {
        let rows = vec![
            row("0.00013", 2, "2500.5"),
            row("0.0009", 30, "-120"),
            row("0.0021", 30, "85.25"),
        ];
        let periods = [p(2), p(30)];
        assert_eq!(aggregate(&rows, &periods), aggregate(&rows, &periods));
    }

    #[test]
    fn test_row_order_independent() {
        let mut rows = vec![
            row("0.001", 30, "100"),
            row("0.002", 30, "300"),
            row("0.0015", 30, "50"),
        ];
        let forward = aggregate(&rows, &[p(30)]);
        rows.reverse();
        let reversed = aggregate(&rows, &[p(30)]);
        assert_eq!(forward, reversed);
    }
}
