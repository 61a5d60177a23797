//! REST plumbing for the funding offer bot.
//!
//! Thin client for the handful of exchange endpoints the run cycle needs:
//! platform status, funding book snapshots and funding stats on the public
//! side; auto-renew toggles, offer cancellation and offer submission on
//! the authenticated side. The decision logic never sees any of this; it
//! is reached through the `FundingMarketData` / `OfferSink` seam traits.

pub mod auth;
pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use auth::Credentials;
pub use client::FundingClient;
pub use error::{ExchangeError, ExchangeResult};
pub use traits::{BoxFuture, FundingMarketData, MockFundingExchange, OfferSink};
pub use types::{ActiveOffer, AutoRenewStatus, FundingStatsEntry, PlatformStatus};
