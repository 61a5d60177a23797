//! Seam traits between orchestration and the exchange.
//!
//! Dyn-compatible trait abstractions over the REST client so the run
//! cycle can be driven against a mock in tests and the core never takes
//! a dependency on the transport.

use crate::error::ExchangeResult;
use crate::types::{ActiveOffer, AutoRenewStatus, FundingStatsEntry};
use lender_core::{BookRow, FundingOffer};
use parking_lot::Mutex;
use std::pin::Pin;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Market data source: one funding book snapshot per run, plus the
/// observational endpoints logged around it.
pub trait FundingMarketData: Send + Sync {
    /// Whether the exchange is accepting requests (not in maintenance).
    fn platform_operative(&self) -> BoxFuture<'_, ExchangeResult<bool>>;

    /// Fetch a funding book snapshot, bounded to `len` rows per side.
    fn funding_book<'a>(
        &'a self,
        currency: &'a str,
        len: u32,
    ) -> BoxFuture<'a, ExchangeResult<Vec<BookRow>>>;

    /// Latest funding stats record (FRR), if any.
    fn funding_stats<'a>(
        &'a self,
        currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Option<FundingStatsEntry>>>;
}

/// Offer submission sink: exactly one lending offer placed per
/// `submit_offer` call.
pub trait OfferSink: Send + Sync {
    /// Read the exchange-side auto-renew setting (None = off).
    fn auto_renew_status<'a>(
        &'a self,
        currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Option<AutoRenewStatus>>>;

    /// Turn exchange-side auto-renew off; the bot manages renewal itself.
    fn disable_auto_renew<'a>(&'a self, currency: &'a str) -> BoxFuture<'a, ExchangeResult<()>>;

    /// Cancel every resting funding offer for the currency.
    fn cancel_all_offers<'a>(&'a self, currency: &'a str) -> BoxFuture<'a, ExchangeResult<()>>;

    /// Place one funding offer.
    fn submit_offer(&self, offer: FundingOffer) -> BoxFuture<'_, ExchangeResult<()>>;

    /// Read back the currently resting offers.
    fn active_offers<'a>(
        &'a self,
        currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Vec<ActiveOffer>>>;
}

/// Recording mock implementing both seams, for orchestration tests.
#[derive(Default)]
pub struct MockFundingExchange {
    /// Book snapshot to serve.
    pub book: Mutex<Vec<BookRow>>,
    /// Platform status to report.
    pub operative: Mutex<bool>,
    /// Funding stats record to serve.
    pub stats: Mutex<Option<FundingStatsEntry>>,
    /// Auto-renew status to serve.
    pub auto_renew: Mutex<Option<AutoRenewStatus>>,
    /// Offers to return from `active_offers`.
    pub resting: Mutex<Vec<ActiveOffer>>,
    /// Recorded `submit_offer` calls.
    submitted: Mutex<Vec<FundingOffer>>,
    /// Recorded `cancel_all_offers` calls.
    cancels: Mutex<Vec<String>>,
    /// Recorded `disable_auto_renew` calls.
    renew_disables: Mutex<Vec<String>>,
}

impl MockFundingExchange {
    pub fn new() -> Self {
        Self {
            operative: Mutex::new(true),
            ..Default::default()
        }
    }

    pub fn submitted(&self) -> Vec<FundingOffer> {
        self.submitted.lock().clone()
    }

    pub fn cancel_calls(&self) -> Vec<String> {
        self.cancels.lock().clone()
    }

    pub fn renew_disable_calls(&self) -> Vec<String> {
        self.renew_disables.lock().clone()
    }
}

impl FundingMarketData for MockFundingExchange {
    fn platform_operative(&self) -> BoxFuture<'_, ExchangeResult<bool>> {
        Box::pin(async move { Ok(*self.operative.lock()) })
    }

    fn funding_book<'a>(
        &'a self,
        _currency: &'a str,
        _len: u32,
    ) -> BoxFuture<'a, ExchangeResult<Vec<BookRow>>> {
        Box::pin(async move { Ok(self.book.lock().clone()) })
    }

    fn funding_stats<'a>(
        &'a self,
        _currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Option<FundingStatsEntry>>> {
        Box::pin(async move { Ok(*self.stats.lock()) })
    }
}

impl OfferSink for MockFundingExchange {
    fn auto_renew_status<'a>(
        &'a self,
        _currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Option<AutoRenewStatus>>> {
        Box::pin(async move { Ok(self.auto_renew.lock().clone()) })
    }

    fn disable_auto_renew<'a>(&'a self, currency: &'a str) -> BoxFuture<'a, ExchangeResult<()>> {
        Box::pin(async move {
            self.renew_disables.lock().push(currency.to_string());
            Ok(())
        })
    }

    fn cancel_all_offers<'a>(&'a self, currency: &'a str) -> BoxFuture<'a, ExchangeResult<()>> {
        Box::pin(async move {
            self.cancels.lock().push(currency.to_string());
            Ok(())
        })
    }

    fn submit_offer(&self, offer: FundingOffer) -> BoxFuture<'_, ExchangeResult<()>> {
        Box::pin(async move {
            self.submitted.lock().push(offer);
            Ok(())
        })
    }

    fn active_offers<'a>(
        &'a self,
        _currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Vec<ActiveOffer>>> {
        Box::pin(async move { Ok(self.resting.lock().clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lender_core::{Amount, Period, Rate};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_records_submissions() {
        let mock = MockFundingExchange::new();
        let offer = FundingOffer::new(
            "fUSD",
            Period::new(30).unwrap(),
            Rate::new(dec!(0.0004)),
            Amount::new(dec!(100)),
        );
        mock.submit_offer(offer.clone()).await.unwrap();
        mock.cancel_all_offers("USD").await.unwrap();

        assert_eq!(mock.submitted(), vec![offer]);
        assert_eq!(mock.cancel_calls(), vec!["USD".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_serves_configured_book() {
        let mock = MockFundingExchange::new();
        *mock.book.lock() = vec![BookRow::new(
            Rate::new(dec!(0.001)),
            Period::new(30).unwrap(),
            Amount::new(dec!(100)),
        )];
        let rows = mock.funding_book("USD", 250).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(mock.platform_operative().await.unwrap());
    }
}
