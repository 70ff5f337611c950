//! Rate lookup in a quote table

use crate::core::currency::Currency;
use crate::core::error::ExchangeError;
use crate::core::quote::QuoteTable;

pub fn pair_code(from: Currency, to: Currency) -> String {
    format!("{}{}", from.code(), to.code())
}

/// Looks up the direct `from`→`to` rate.
///
/// Quote tables are one-directional from their base currency, so a missing
/// direct key is a miss even if the inverse pair is present.
pub fn resolve_rate(table: &QuoteTable, from: Currency, to: Currency) -> Result<f64, ExchangeError> {
    let key = pair_code(from, to);
    table
        .rates
        .get(&key)
        .copied()
        .ok_or(ExchangeError::RateUnavailable(key))
}
