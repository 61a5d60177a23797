//! Logging, metrics and notifications for the funding offer bot.
//!
//! - Structured logging via tracing (JSON in production, pretty otherwise)
//! - Prometheus counters for cycles and placed offers
//! - Telegram notification sink, reported after each submission round

pub mod error;
pub mod logging;
pub mod metrics;
pub mod notify;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
pub use notify::{MockNotifier, Notifier, NullNotifier, TelegramNotifier};
