use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::ApiKey;
use crate::core::error::ExchangeError;
use crate::core::quote::{QuoteSource, QuoteTable};

const LIVE_ENDPOINT: &str = "/currency_data/live";
const USER_AGENT: &str = concat!("xrate/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct LiveQuotesResponse {
    success: bool,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    source: String,
    #[serde(default)]
    quotes: HashMap<String, f64>,
    error: Option<LiveQuotesError>,
}

#[derive(Debug, Deserialize)]
struct LiveQuotesError {
    code: Option<i64>,
    info: Option<String>,
}

impl LiveQuotesResponse {
    fn into_table(self) -> Result<QuoteTable, ExchangeError> {
        if !self.success {
            let message = match self.error {
                Some(LiveQuotesError {
                    code: Some(code),
                    info: Some(info),
                }) => format!("{info} (code {code})"),
                Some(LiveQuotesError {
                    info: Some(info), ..
                }) => info,
                Some(LiveQuotesError {
                    code: Some(code), ..
                }) => format!("quote API reported error code {code}"),
                _ => "quote API reported failure".to_string(),
            };
            return Err(ExchangeError::Upstream(message));
        }

        Ok(QuoteTable {
            success: self.success,
            captured_at: self.timestamp,
            base: self.source,
            rates: self.quotes,
        })
    }
}

/// Parses a live quotes document into a table, rejecting `success: false`.
pub(crate) fn parse_live_quotes(text: &str) -> Result<QuoteTable, ExchangeError> {
    let response: LiveQuotesResponse = serde_json::from_str(text).map_err(|e| {
        ExchangeError::Transport(format!("Failed to parse live quotes response: {e}"))
    })?;
    response.into_table()
}

pub struct CurrencyLayerProvider {
    base_url: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl CurrencyLayerProvider {
    pub fn new(base_url: &str, api_key: ApiKey, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(CurrencyLayerProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    async fn request(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, LIVE_ENDPOINT);
        debug!("Requesting live quotes from {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", self.api_key.expose())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        debug!(status = %response.status(), "Received live quotes response");

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        response
            .text()
            .await
            .context("Failed to read live quotes response body")
    }
}

#[async_trait]
impl QuoteSource for CurrencyLayerProvider {
    #[instrument(name = "CurrencyLayerFetch", skip(self))]
    async fn fetch(&self) -> Result<QuoteTable, ExchangeError> {
        let text = self
            .request()
            .await
            .map_err(|e| ExchangeError::Transport(format!("{e:#}")))?;
        parse_live_quotes(&text)
    }
}
