//! Offer slot allocation.
//!
//! Ranks candidate periods by an attractiveness score and distributes the
//! configured number of offer slots round-robin over the ranking.

use crate::error::{StrategyError, StrategyResult};
use crate::floors::FloorTable;
use lender_core::{AllocationEntry, Period, PeriodStat};
use rust_decimal::prelude::ToPrimitive;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Attractiveness score for one period.
///
/// `(max(vwap, floor) / floor)^alpha * ln(1 + volume)`
///
/// The ratio term rewards periods where the prevailing rate clears the
/// floor by a wide margin; the log-volume term rewards liquidity while
/// damping outlier-thick books. Floors are positive and volume is
/// non-negative, so the score is always finite and non-negative.
fn score(stat: &PeriodStat, floors: &FloorTable, alpha: f64) -> f64 {
    let floor = floors.resolve(stat.period);
    let base = stat.rate_vwap.max(floor);
    let ratio = (base.inner() / floor.inner()).to_f64().unwrap_or(1.0);
    ratio.powf(alpha) * stat.volume.to_f64().ln_1p()
}

/// Distribute `split` offer slots over the ranked periods.
///
/// Slot `i` (0-indexed) goes to `ranked[i % len(ranked)]`, so with
/// `split <= len` each of the top `split` periods gets exactly one slot,
/// and with `split > len` the highest-ranked periods accumulate extras
/// first. Entries come back in rank order, zero-count periods omitted,
/// counts summing to exactly `split`.
///
/// Fails with `EmptyMarket` when there are no stats to rank; planning is
/// all-or-nothing and the caller must skip the cycle.
pub fn plan(
    stats: &BTreeMap<Period, PeriodStat>,
    split: u32,
    floors: &FloorTable,
    alpha: f64,
) -> StrategyResult<Vec<AllocationEntry>> {
    if stats.is_empty() {
        return Err(StrategyError::EmptyMarket);
    }

    let mut ranked: Vec<(Period, f64)> = stats
        .values()
        .map(|stat| (stat.period, score(stat, floors, alpha)))
        .collect();
    // Stable sort: tied scores keep ascending-period order from the map.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    for (period, s) in &ranked {
        debug!(%period, score = s, "Ranked period");
    }

    let counts = (0..split).fold(BTreeMap::<Period, u32>::new(), |mut acc, i| {
        let (period, _) = ranked[i as usize % ranked.len()];
        *acc.entry(period).or_insert(0) += 1;
        acc
    });

    Ok(ranked
        .iter()
        .filter_map(|(period, _)| {
            counts
                .get(period)
                .map(|&count| AllocationEntry::new(*period, count))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lender_core::{Amount, Rate};
    use rust_decimal_macros::dec;

    fn p(days: u16) -> Period {
        Period::new(days).unwrap()
    }

    fn stat(days: u16, vwap: &str, max: &str, volume: &str) -> PeriodStat {
        PeriodStat {
            period: p(days),
            volume: Amount::new(volume.parse().unwrap()),
            rate_vwap: Rate::new(vwap.parse().unwrap()),
            rate_max: Rate::new(max.parse().unwrap()),
        }
    }

    fn stats_of(stats: Vec<PeriodStat>) -> BTreeMap<Period, PeriodStat> {
        stats.into_iter().map(|s| (s.period, s)).collect()
    }

    fn flat_floors() -> FloorTable {
        let mut floors = BTreeMap::new();
        for days in [2, 30, 60, 120] {
            floors.insert(p(days), Rate(dec!(0.0002)));
        }
        FloorTable::with_default_floor(floors).unwrap()
    }

    #[test]
    fn test_empty_stats_is_an_error() {
        for split in [1, 3, 20] {
            let err = plan(&BTreeMap::new(), split, &flat_floors(), 0.5).unwrap_err();
            assert!(matches!(err, StrategyError::EmptyMarket));
        }
    }

    #[test]
    fn test_counts_sum_to_split() {
        let stats = stats_of(vec![
            stat(2, "0.0003", "0.0005", "1000"),
            stat(30, "0.0008", "0.0012", "5000"),
            stat(120, "0.0002", "0.0004", "300"),
        ]);
        for split in 1..=20 {
            let entries = plan(&stats, split, &flat_floors(), 0.5).unwrap();
            let total: u32 = entries.iter().map(|e| e.count).sum();
            assert_eq!(total, split);
            assert!(entries.iter().all(|e| e.count > 0));
        }
    }

    #[test]
    fn test_best_period_ranked_first() {
        // 30d has both the richest rate and the deepest book.
        let stats = stats_of(vec![
            stat(2, "0.0003", "0.0005", "1000"),
            stat(30, "0.0008", "0.0012", "5000"),
            stat(120, "0.0002", "0.0004", "300"),
        ]);
        let entries = plan(&stats, 3, &flat_floors(), 0.5).unwrap();
        assert_eq!(entries[0].period, p(30));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_round_robin_wraparound() {
        // 4 ranked periods, split=5: top gets 2, the rest 1 each.
        let stats = stats_of(vec![
            stat(2, "0.0004", "0.0006", "2000"),
            stat(30, "0.0008", "0.0012", "5000"),
            stat(60, "0.0003", "0.0005", "800"),
            stat(120, "0.0002", "0.0004", "300"),
        ]);
        let entries = plan(&stats, 5, &flat_floors(), 0.5).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].period, p(30));
        assert_eq!(entries[0].count, 2);
        assert!(entries[1..].iter().all(|e| e.count == 1));
        assert_eq!(entries.iter().map(|e| e.count).sum::<u32>(), 5);
    }

    #[test]
    fn test_monotonic_allocation() {
        let stats = stats_of(vec![
            stat(2, "0.0004", "0.0006", "2000"),
            stat(30, "0.0008", "0.0012", "5000"),
            stat(60, "0.0003", "0.0005", "800"),
        ]);
        let floors = flat_floors();
        let entries = plan(&stats, 7, &floors, 0.5).unwrap();

        // Higher-scored periods never receive fewer slots.
        for pair in entries.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_split_smaller_than_ranking_omits_tail() {
        let stats = stats_of(vec![
            stat(2, "0.0004", "0.0006", "2000"),
            stat(30, "0.0008", "0.0012", "5000"),
            stat(60, "0.0003", "0.0005", "800"),
            stat(120, "0.0002", "0.0004", "300"),
        ]);
        let entries = plan(&stats, 2, &flat_floors(), 0.5).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.count == 1));
    }

    #[test]
    fn test_tie_break_is_ascending_period() {
        // Identical stats everywhere -> identical scores; stable sort keeps
        // the map's ascending-period order.
        let stats = stats_of(vec![
            stat(120, "0.0004", "0.0006", "1000"),
            stat(2, "0.0004", "0.0006", "1000"),
            stat(30, "0.0004", "0.0006", "1000"),
        ]);
        let entries = plan(&stats, 3, &flat_floors(), 0.5).unwrap();
        let periods: Vec<u16> = entries.iter().map(|e| e.period.days()).collect();
        assert_eq!(periods, vec![2, 30, 120]);
    }

    #[test]
    fn test_zero_volume_period_scores_zero() {
        // ln(1 + 0) = 0 kills the score regardless of the rate term.
        let stats = stats_of(vec![
            stat(2, "0", "0", "0"),
            stat(30, "0.0003", "0.0004", "100"),
        ]);
        let entries = plan(&stats, 1, &flat_floors(), 0.5).unwrap();
        assert_eq!(entries[0].period, p(30));
    }

    #[test]
    fn test_vwap_below_floor_uses_floor_as_base() {
        // Both periods sit below their floors, so the ratio term is 1 for
        // both and only volume differentiates them.
        let stats = stats_of(vec![
            stat(2, "0.0001", "0.0002", "500"),
            stat(30, "0.00005", "0.0001", "900"),
        ]);
        let entries = plan(&stats, 1, &flat_floors(), 0.5).unwrap();
        assert_eq!(entries[0].period, p(30));
    }
}
