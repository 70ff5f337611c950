use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::currency_layer::parse_live_quotes;
use crate::core::error::ExchangeError;
use crate::core::quote::{QuoteSource, QuoteTable};

const SAMPLE_LIVE_QUOTES: &str = include_str!("fixtures/live_quotes.json");

/// Serves a captured live quotes document, optionally after a simulated delay.
pub struct FixtureQuoteSource {
    delay: Duration,
}

impl FixtureQuoteSource {
    pub fn new(delay: Duration) -> Self {
        FixtureQuoteSource { delay }
    }

    pub fn sample_table() -> Result<QuoteTable, ExchangeError> {
        parse_live_quotes(SAMPLE_LIVE_QUOTES)
    }
}

#[async_trait]
impl QuoteSource for FixtureQuoteSource {
    async fn fetch(&self) -> Result<QuoteTable, ExchangeError> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "Simulating quote latency");
            tokio::time::sleep(self.delay).await;
        }
        Self::sample_table()
    }
}
