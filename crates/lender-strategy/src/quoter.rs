//! Interest rate quoting.
//!
//! Computes the single rate used by every offer slot allocated to a
//! period: a blend between the VWAP-or-floor baseline and the observed
//! book maximum, clamped into the configured bounds.

use crate::error::{StrategyError, StrategyResult};
use crate::floors::FloorTable;
use lender_core::{Period, PeriodStat, Rate};
use rust_decimal::Decimal;

/// Quote the offer rate for one period.
///
/// `base = max(vwap, floor)`; `raw = base + beta * (rate_max - base)`.
/// `beta` in `(0, 1]` steers between matching the baseline and quoting
/// at the observed maximum. The result is clamped into `[floor, cap]`.
///
/// Fails with `InvalidBounds` when the resolved floor exceeds `cap`,
/// before any blending happens; a silently out-of-order clamp would
/// otherwise quote below the floor.
pub fn quote_rate(
    stat: &PeriodStat,
    period: Period,
    floors: &FloorTable,
    beta: Decimal,
    cap: Rate,
) -> StrategyResult<Rate> {
    let floor = floors.resolve(period);
    if floor > cap {
        return Err(StrategyError::InvalidBounds { period, floor, cap });
    }

    let base = stat.rate_vwap.max(floor);
    let raw = base + (stat.rate_max - base) * beta;
    Ok(raw.clamp_to(floor, cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lender_core::Amount;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn p30() -> Period {
        Period::new(30).unwrap()
    }

    fn floors(floor: Decimal) -> FloorTable {
        let mut map = BTreeMap::new();
        map.insert(p30(), Rate(floor));
        FloorTable::with_default_floor(map).unwrap()
    }

    fn stat(vwap: Decimal, max: Decimal) -> PeriodStat {
        PeriodStat {
            period: p30(),
            volume: Amount::new(dec!(1000)),
            rate_vwap: Rate(vwap),
            rate_max: Rate(max),
        }
    }

    #[test]
    fn test_blend_between_base_and_max() {
        let s = stat(dec!(0.0004), dec!(0.0008));
        // base 0.0004, raw = 0.0004 + 0.5 * 0.0004 = 0.0006
        let rate = quote_rate(&s, p30(), &floors(dec!(0.0002)), dec!(0.5), Rate(dec!(0.01)))
            .unwrap();
        assert_eq!(rate, Rate(dec!(0.0006)));
    }

    #[test]
    fn test_beta_one_quotes_the_max() {
        let s = stat(dec!(0.0004), dec!(0.0008));
        let rate = quote_rate(&s, p30(), &floors(dec!(0.0002)), dec!(1), Rate(dec!(0.01)))
            .unwrap();
        assert_eq!(rate, Rate(dec!(0.0008)));
    }

    #[test]
    fn test_beta_one_respects_cap() {
        let s = stat(dec!(0.0004), dec!(0.02));
        let rate = quote_rate(&s, p30(), &floors(dec!(0.0002)), dec!(1), Rate(dec!(0.01)))
            .unwrap();
        assert_eq!(rate, Rate(dec!(0.01)));
    }

    #[test]
    fn test_small_beta_stays_near_base() {
        let s = stat(dec!(0.0004), dec!(0.0008));
        let rate = quote_rate(
            &s,
            p30(),
            &floors(dec!(0.0002)),
            dec!(0.0001),
            Rate(dec!(0.01)),
        )
        .unwrap();
        // Converges to max(vwap, floor) as beta approaches zero.
        assert!(rate > Rate(dec!(0.0004)));
        assert!(rate < Rate(dec!(0.000401)));
    }

    #[test]
    fn test_vwap_below_floor_uses_floor_as_base() {
        let s = stat(dec!(0.0001), dec!(0.0003));
        // base = floor = 0.0002, raw = 0.0002 + 0.4 * 0.0001 = 0.00024
        let rate = quote_rate(&s, p30(), &floors(dec!(0.0002)), dec!(0.4), Rate(dec!(0.01)))
            .unwrap();
        assert_eq!(rate, Rate(dec!(0.00024)));
    }

    #[test]
    fn test_thin_book_clamps_up_to_floor() {
        // rate_max below base drags raw negative-ward; clamp restores floor.
        let s = stat(dec!(0), dec!(0));
        let rate = quote_rate(&s, p30(), &floors(dec!(0.0002)), dec!(0.4), Rate(dec!(0.01)))
            .unwrap();
        assert_eq!(rate, Rate(dec!(0.0002)));
    }

    #[test]
    fn test_floor_above_cap_is_an_error() {
        let s = stat(dec!(0.0004), dec!(0.0008));
        let err = quote_rate(&s, p30(), &floors(dec!(0.02)), dec!(0.4), Rate(dec!(0.01)))
            .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidBounds { .. }));
    }

    #[test]
    fn test_result_always_within_bounds() {
        let floor = dec!(0.0002);
        let cap = dec!(0.01);
        let table = floors(floor);
        for (vwap, max) in [
            (dec!(0), dec!(0)),
            (dec!(0.0001), dec!(0.5)),
            (dec!(0.009), dec!(0.05)),
            (dec!(0.5), dec!(0.6)),
        ] {
            for beta in [dec!(0.01), dec!(0.4), dec!(1)] {
                let rate = quote_rate(&stat(vwap, max), p30(), &table, beta, Rate(cap)).unwrap();
                assert!(rate >= Rate(floor) && rate <= Rate(cap));
            }
        }
    }
}
