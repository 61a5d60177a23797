//! Notification sink.
//!
//! Purely observational: the run cycle reports how many offers it placed
//! and the sink delivers that somewhere a human will see it. Failures are
//! the caller's to log; they must never abort a cycle.

use crate::error::{TelemetryError, TelemetryResult};
use parking_lot::Mutex;
use serde_json::json;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Outbound notification sink.
pub trait Notifier: Send + Sync {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, TelemetryResult<()>>;
}

/// Telegram bot notifier.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: impl Into<String>) -> TelemetryResult<Self> {
        Self::with_api_url(
            format!("https://api.telegram.org/bot{bot_token}"),
            chat_id,
        )
    }

    /// Point at a specific API base (tests use a stub).
    pub fn with_api_url(
        api_url: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> TelemetryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TelemetryError::Notify(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            chat_id: chat_id.into(),
        })
    }

    /// Load from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`, if both set.
    pub fn from_env() -> TelemetryResult<Option<Self>> {
        match (
            std::env::var("TELEGRAM_BOT_TOKEN"),
            std::env::var("TELEGRAM_CHAT_ID"),
        ) {
            (Ok(token), Ok(chat_id)) => Ok(Some(Self::new(&token, chat_id)?)),
            _ => Ok(None),
        }
    }
}

impl Notifier for TelegramNotifier {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, TelemetryResult<()>> {
        Box::pin(async move {
            let url = format!("{}/sendMessage", self.api_url);
            let response = self
                .client
                .post(&url)
                .json(&json!({ "chat_id": self.chat_id, "text": text }))
                .send()
                .await
                .map_err(|e| TelemetryError::Notify(format!("HTTP request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(TelemetryError::Notify(format!("HTTP {status}: {body}")));
            }
            debug!("Notification delivered");
            Ok(())
        })
    }
}

/// Notifier that drops everything, for runs without a configured channel.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, TelemetryResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Recording notifier for orchestration tests.
#[derive(Debug, Default)]
pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for MockNotifier {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, TelemetryResult<()>> {
        Box::pin(async move {
            self.messages.lock().push(text.to_string());
            Ok(())
        })
    }
}
