//! Main application orchestration.
//!
//! One cycle: status checks, stale-offer cleanup, one funding book
//! snapshot through the aggregator/planner/quoter pipeline, rate-limited
//! submission, then a notification. The decision logic stays pure; all
//! I/O goes through the seam traits so the cycle is testable end to end
//! against mocks.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use lender_core::{Amount, FundingOffer, Period};
use lender_exchange::client::funding_symbol;
use lender_exchange::{FundingMarketData, OfferSink};
use lender_strategy::{aggregate, plan, quote_rate, FloorTable, StrategyError};
use lender_telemetry::{Metrics, Notifier};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Exchange quoting precision for rates (decimal places).
const RATE_PRECISION: u32 = 5;

/// Outcome of one planning cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Whether the cycle was skipped (maintenance or empty market).
    pub skipped: bool,
    /// Offers actually submitted.
    pub offers_placed: u32,
    /// Total amount resting after submission settled.
    pub resting_amount: Amount,
}

impl CycleReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            offers_placed: 0,
            resting_amount: Amount::ZERO,
        }
    }
}

/// Main application.
pub struct Application {
    config: AppConfig,
    floors: FloorTable,
    market: Arc<dyn FundingMarketData>,
    sink: Arc<dyn OfferSink>,
    notifier: Arc<dyn Notifier>,
}

impl Application {
    /// Create an application over explicit collaborators.
    ///
    /// The config must already be validated; the floor table is resolved
    /// once here and reused every cycle.
    pub fn new(
        config: AppConfig,
        market: Arc<dyn FundingMarketData>,
        sink: Arc<dyn OfferSink>,
        notifier: Arc<dyn Notifier>,
    ) -> AppResult<Self> {
        let floors = config.floor_table()?;
        floors.validate_against_cap(config.strategy.rate_max)?;
        Ok(Self {
            config,
            floors,
            market,
            sink,
            notifier,
        })
    }

    /// Run one planning cycle.
    ///
    /// An empty market aborts the cycle before any submission; the error
    /// surfaces to the caller, which skips the run.
    pub async fn run_cycle(&self) -> AppResult<CycleReport> {
        let currency = &self.config.currency;

        if !self.market.platform_operative().await? {
            warn!("Exchange in maintenance, skipping cycle");
            Metrics::cycle("skipped");
            return Ok(CycleReport::skipped());
        }

        if let Some(stats) = self.market.funding_stats(currency).await? {
            info!(
                %currency,
                mts = stats.mts,
                frr = %stats.frr,
                frr_apr_pct = %stats.frr.apr_pct(),
                "Latest funding stats"
            );
        }

        // The exchange-side auto-renew would re-lend at its own rate;
        // renewal is this bot's job, so switch it off first.
        match self.sink.auto_renew_status(currency).await? {
            Some(status) => {
                info!(
                    %currency,
                    rate = %status.rate,
                    period = %status.period,
                    amount = %status.amount,
                    "Auto-renew active, disabling"
                );
                self.sink.disable_auto_renew(currency).await?;
            }
            None => info!(%currency, "Auto-renew not active"),
        }

        self.sink.cancel_all_offers(currency).await?;

        let periods: Vec<Period> = self.floors.periods().collect();
        let rows = self
            .market
            .funding_book(currency, self.config.book_len)
            .await?;
        Metrics::book_rows(currency, rows.len());

        let stats = aggregate(&rows, &periods);
        let entries = plan(
            &stats,
            self.config.strategy.split,
            &self.floors,
            self.config.strategy.alpha,
        )?;
        info!(?entries, "Allocation plan");

        let symbol = funding_symbol(currency);
        let amount_each = Amount::new(self.config.amount).split_by(self.config.strategy.split);
        let mut offers_placed = 0u32;

        for entry in &entries {
            let stat = stats.get(&entry.period).ok_or_else(|| {
                AppError::Cycle(format!("plan references unknown period {}", entry.period))
            })?;
            let rate = quote_rate(
                stat,
                entry.period,
                &self.floors,
                self.config.strategy.beta,
                self.config.strategy.rate_max,
            )?
            .round_dp(RATE_PRECISION);
            Metrics::quote_rate(currency, &entry.period.to_string(), rate.to_f64());

            for _ in 0..entry.count {
                let offer = FundingOffer::new(&symbol, entry.period, rate, amount_each);
                self.sink.submit_offer(offer).await?;
                offers_placed += 1;
                Metrics::offer_placed(currency, &entry.period.to_string());
                tokio::time::sleep(Duration::from_millis(self.config.submit_delay_ms)).await;
            }
        }

        // Give the exchange a moment to register the offers before
        // reading them back.
        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        let resting = self.sink.active_offers(currency).await?;
        let resting_amount = resting
            .iter()
            .fold(Amount::ZERO, |acc, offer| acc + offer.amount);
        info!(
            offers = resting.len(),
            amount = %resting_amount,
            "Resting offers after submission"
        );

        let text = format!(
            "lender-bot: placed {offers_placed} offers, {resting_amount} {currency} lent out"
        );
        if let Err(e) = self.notifier.notify(&text).await {
            error!(error = %e, "Notification failed");
        }

        Metrics::cycle("ok");
        Ok(CycleReport {
            skipped: false,
            offers_placed,
            resting_amount,
        })
    }

    /// Run forever on the configured interval.
    ///
    /// An empty market skips the cycle; other errors are logged and the
    /// loop keeps going.
    pub async fn run(&self) -> AppResult<()> {
        let interval = Duration::from_secs(self.config.interval_secs);
        info!(interval_secs = self.config.interval_secs, "Starting run loop");

        loop {
            match self.run_cycle().await {
                Ok(report) if report.skipped => {
                    info!("Cycle skipped");
                }
                Ok(report) => {
                    info!(offers = report.offers_placed, "Cycle completed");
                }
                Err(AppError::Strategy(StrategyError::EmptyMarket)) => {
                    warn!("Funding book empty, skipping cycle");
                    Metrics::cycle("skipped");
                }
                Err(e) => {
                    error!(error = %e, "Cycle failed");
                    Metrics::cycle("error");
                }
            }
            tokio::time::sleep(interval).await;
        }
    }
}
