//! Quote table and the abstraction over where it comes from

use crate::core::error::ExchangeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One snapshot of exchange rates, replaced wholesale by every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTable {
    pub success: bool,
    /// Seconds since the epoch at which the rates were captured.
    #[serde(rename = "timestamp")]
    pub captured_at: i64,
    #[serde(rename = "source")]
    pub base: String,
    /// Pair code (e.g. `USDKRW`) to rate.
    #[serde(rename = "quotes")]
    pub rates: HashMap<String, f64>,
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches the latest quote table. Failures are reported, never retried here.
    async fn fetch(&self) -> Result<QuoteTable, ExchangeError>;
}
