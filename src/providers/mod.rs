pub mod currency_layer;
pub mod fixture;

use crate::core::config::{AppConfig, QuoteSourceKind};
use crate::core::quote::QuoteSource;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use currency_layer::CurrencyLayerProvider;
pub use fixture::FixtureQuoteSource;

/// Builds the quote source selected by `config.source`.
pub fn build_quote_source(config: &AppConfig) -> Result<Arc<dyn QuoteSource>> {
    match config.source {
        QuoteSourceKind::Live => {
            let provider = &config.providers.currency_layer;
            debug!(base_url = %provider.base_url, "Using live quote source");
            let api_key = provider.resolve_api_key()?;
            Ok(Arc::new(CurrencyLayerProvider::new(
                &provider.base_url,
                api_key,
                Duration::from_secs(provider.timeout_secs),
            )?))
        }
        QuoteSourceKind::Fixture => {
            let delay = Duration::from_millis(config.providers.fixture.delay_ms);
            debug!(?delay, "Using fixture quote source");
            Ok(Arc::new(FixtureQuoteSource::new(delay)))
        }
    }
}
