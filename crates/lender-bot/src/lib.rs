//! Funding offer auto-renew bot.
//!
//! Orchestrates one planning cycle per interval:
//! - platform status and funding stats checks
//! - disable exchange-side auto-renew, cancel stale offers
//! - funding book snapshot -> stats -> allocation plan -> quoted rates
//! - rate-limited offer submission and a notification afterwards

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, CycleReport};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
