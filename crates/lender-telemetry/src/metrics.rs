//! Prometheus metrics for the funding offer bot.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration
//! failure means duplicate metric names, a fatal configuration error that
//! should crash at startup rather than fail silently. These panics only
//! occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_int_counter_vec, CounterVec, GaugeVec,
    IntCounterVec,
};

/// Planning cycles by outcome (ok / skipped / error).
pub static CYCLES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "lender_cycles_total",
        "Total planning cycles by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// Funding offers placed.
pub static OFFERS_PLACED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "lender_offers_placed_total",
        "Total funding offers placed",
        &["currency", "period"]
    )
    .unwrap()
});

/// Funding book rows observed per snapshot.
pub static BOOK_ROWS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "lender_book_rows_total",
        "Total funding book rows fetched",
        &["currency"]
    )
    .unwrap()
});

/// Last quoted rate per currency and period.
pub static QUOTE_RATE: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "lender_quote_rate",
        "Last quoted daily interest rate",
        &["currency", "period"]
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a completed cycle.
    pub fn cycle(outcome: &str) {
        CYCLES_TOTAL.with_label_values(&[outcome]).inc();
    }

    /// Record one placed offer.
    pub fn offer_placed(currency: &str, period: &str) {
        OFFERS_PLACED_TOTAL
            .with_label_values(&[currency, period])
            .inc();
    }

    /// Record book rows fetched.
    pub fn book_rows(currency: &str, rows: usize) {
        BOOK_ROWS.with_label_values(&[currency]).inc_by(rows as f64);
    }

    /// Record the rate quoted for a period.
    pub fn quote_rate(currency: &str, period: &str, rate: f64) {
        QUOTE_RATE.with_label_values(&[currency, period]).set(rate);
    }
}
