//! REST client for the funding endpoints.
//!
//! Public market data goes to the public API host, authenticated offer
//! management to the trading host with HMAC-signed headers. Only the
//! seven calls the run cycle needs are implemented.

use crate::auth::Credentials;
use crate::error::{ExchangeError, ExchangeResult};
use crate::traits::{BoxFuture, FundingMarketData, OfferSink};
use crate::types::{decimal_at, ActiveOffer, AutoRenewStatus, FundingStatsEntry, PlatformStatus};
use lender_core::{Amount, BookRow, FundingOffer, Period, Rate};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Public (unauthenticated) API host.
pub const DEFAULT_PUBLIC_URL: &str = "https://api-pub.bitfinex.com";
/// Authenticated API host.
pub const DEFAULT_AUTH_URL: &str = "https://api.bitfinex.com";

/// Funding symbol for a currency, e.g. "USD" -> "fUSD".
pub fn funding_symbol(currency: &str) -> String {
    format!("f{currency}")
}

/// REST client for funding market data and offer management.
pub struct FundingClient {
    client: Client,
    public_url: String,
    auth_url: String,
    credentials: Option<Credentials>,
    /// Strictly increasing per API key.
    last_nonce: AtomicI64,
}

impl FundingClient {
    /// Create a client. Without credentials only the public endpoints
    /// work; authenticated calls fail with `MissingCredentials`.
    pub fn new(credentials: Option<Credentials>) -> ExchangeResult<Self> {
        Self::with_urls(credentials, DEFAULT_PUBLIC_URL, DEFAULT_AUTH_URL)
    }

    /// Create a client against specific hosts (tests point this at a stub).
    pub fn with_urls(
        credentials: Option<Credentials>,
        public_url: impl Into<String>,
        auth_url: impl Into<String>,
    ) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ExchangeError::Http(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            public_url: public_url.into(),
            auth_url: auth_url.into(),
            credentials,
            last_nonce: AtomicI64::new(0),
        })
    }

    /// Next request nonce: epoch milliseconds, bumped if the clock has
    /// not advanced since the previous request.
    fn next_nonce(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .map(|last| now.max(last + 1))
            .unwrap_or(now)
    }

    async fn public_get(&self, path: &str) -> ExchangeResult<Value> {
        let url = format!("{}/{path}", self.public_url);
        debug!(%url, "Public GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExchangeError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Http(format!("HTTP {status}: {body}")));
        }
        response
            .json()
            .await
            .map_err(|e| ExchangeError::Parse(format!("Failed to parse response: {e}")))
    }

    async fn auth_post(&self, path: &str, body: Value) -> ExchangeResult<Value> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ExchangeError::MissingCredentials(format!("{path} requires API credentials"))
        })?;

        let nonce = self.next_nonce().to_string();
        let raw_body = body.to_string();
        let signature = credentials.sign(path, &nonce, &raw_body)?;

        let url = format!("{}/{path}", self.auth_url);
        debug!(%url, "Authenticated POST");
        let response = self
            .client
            .post(&url)
            .header("bfx-nonce", &nonce)
            .header("bfx-apikey", &credentials.api_key)
            .header("bfx-signature", &signature)
            .header("content-type", "application/json")
            .body(raw_body)
            .send()
            .await
            .map_err(|e| ExchangeError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Http(format!("HTTP {status}: {body}")));
        }
        response
            .json()
            .await
            .map_err(|e| ExchangeError::Parse(format!("Failed to parse response: {e}")))
    }
}

impl FundingMarketData for FundingClient {
    fn platform_operative(&self) -> BoxFuture<'_, ExchangeResult<bool>> {
        Box::pin(async move {
            let value = self.public_get("v2/platform/status").await?;
            Ok(PlatformStatus::from_value(&value)?.is_operative())
        })
    }

    /// Book rows come back as `[RATE, PERIOD, COUNT, AMOUNT]`; rows with
    /// a period outside the valid lending range are dropped with a
    /// warning rather than failing the snapshot.
    fn funding_book<'a>(
        &'a self,
        currency: &'a str,
        len: u32,
    ) -> BoxFuture<'a, ExchangeResult<Vec<BookRow>>> {
        Box::pin(async move {
            let symbol = funding_symbol(currency);
            let value = self
                .public_get(&format!("v2/book/{symbol}/P0?len={len}"))
                .await?;
            let raw_rows = value
                .as_array()
                .ok_or_else(|| ExchangeError::Parse("funding book is not an array".to_string()))?;

            let mut rows = Vec::with_capacity(raw_rows.len());
            for row in raw_rows {
                let rate = Rate::new(decimal_at(row, 0, "book rate")?);
                let period_days = row.get(1).and_then(Value::as_u64).ok_or_else(|| {
                    ExchangeError::Parse("book row missing period".to_string())
                })?;
                let amount = Amount::new(decimal_at(row, 3, "book amount")?);
                match Period::new(period_days as u16) {
                    Ok(period) => rows.push(BookRow::new(rate, period, amount)),
                    Err(_) => warn!(period_days, "Dropping book row with invalid period"),
                }
            }

            info!(%symbol, rows = rows.len(), "Fetched funding book snapshot");
            Ok(rows)
        })
    }

    fn funding_stats<'a>(
        &'a self,
        currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Option<FundingStatsEntry>>> {
        Box::pin(async move {
            let symbol = funding_symbol(currency);
            let value = self
                .public_get(&format!("v2/funding/stats/{symbol}/hist?limit=1"))
                .await?;
            let rows = value
                .as_array()
                .ok_or_else(|| ExchangeError::Parse("funding stats is not an array".to_string()))?;
            rows.first().map(FundingStatsEntry::from_value).transpose()
        })
    }
}

impl OfferSink for FundingClient {
    fn auto_renew_status<'a>(
        &'a self,
        currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Option<AutoRenewStatus>>> {
        Box::pin(async move {
            let value = self
                .auth_post(
                    "v2/auth/r/funding/auto/status",
                    json!({ "currency": currency }),
                )
                .await?;
            AutoRenewStatus::from_value(&value)
        })
    }

    fn disable_auto_renew<'a>(&'a self, currency: &'a str) -> BoxFuture<'a, ExchangeResult<()>> {
        Box::pin(async move {
            self.auth_post(
                "v2/auth/w/funding/auto",
                json!({ "status": 0, "currency": currency }),
            )
            .await?;
            info!(%currency, "Disabled exchange-side auto-renew");
            Ok(())
        })
    }

    fn cancel_all_offers<'a>(&'a self, currency: &'a str) -> BoxFuture<'a, ExchangeResult<()>> {
        Box::pin(async move {
            self.auth_post(
                "v2/auth/w/funding/offer/cancel/all",
                json!({ "currency": currency }),
            )
            .await?;
            info!(%currency, "Cancelled all resting funding offers");
            Ok(())
        })
    }

    fn submit_offer(&self, offer: FundingOffer) -> BoxFuture<'_, ExchangeResult<()>> {
        Box::pin(async move {
            // Exchange precision: amount 2 dp as a string, rate as quoted.
            let body = json!({
                "type": offer.offer_type.to_string(),
                "symbol": offer.symbol,
                "amount": format!("{:.2}", offer.amount.inner()),
                "rate": offer.rate.inner(),
                "period": offer.period.days(),
                "flags": 0,
            });
            self.auth_post("v2/auth/w/funding/offer/submit", body).await?;
            info!(
                symbol = %offer.symbol,
                period = %offer.period,
                rate = %offer.rate,
                amount = %offer.amount,
                "Submitted funding offer"
            );
            Ok(())
        })
    }

    fn active_offers<'a>(
        &'a self,
        currency: &'a str,
    ) -> BoxFuture<'a, ExchangeResult<Vec<ActiveOffer>>> {
        Box::pin(async move {
            let symbol = funding_symbol(currency);
            let value = self
                .auth_post(&format!("v2/auth/r/funding/offers/{symbol}"), json!({}))
                .await?;
            let rows = value
                .as_array()
                .ok_or_else(|| ExchangeError::Parse("offers response is not an array".to_string()))?;
            rows.iter().map(ActiveOffer::from_value).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funding_symbol() {
        assert_eq!(funding_symbol("USD"), "fUSD");
        assert_eq!(funding_symbol("UST"), "fUST");
    }

    #[test]
    fn test_nonce_strictly_increasing() {
        let client = FundingClient::new(None).unwrap();
        let a = client.next_nonce();
        let b = client.next_nonce();
        let c = client.next_nonce();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_auth_call_without_credentials_fails() {
        let client = FundingClient::new(None).unwrap();
        let err = client.cancel_all_offers("USD").await.unwrap_err();
        assert!(matches!(err, ExchangeError::MissingCredentials(_)));
    }
}
