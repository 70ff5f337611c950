//! Validation of the raw sending amount typed by the user

use crate::core::error::ExchangeError;

pub const MAX_SENDING_AMOUNT: i64 = 10_000;

/// An amount known to lie in `0..=MAX_SENDING_AMOUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValidatedAmount(i64);

impl ValidatedAmount {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Parses `raw` as a base-10 integer and checks the accepted range.
///
/// No trimming or locale handling is applied: `" 5"` and `"1,000"` are rejected.
pub fn validate_amount(raw: &str) -> Result<ValidatedAmount, ExchangeError> {
    let amount = raw
        .parse::<i64>()
        .map_err(|_| ExchangeError::InvalidInput(raw.to_string()))?;

    if !(0..=MAX_SENDING_AMOUNT).contains(&amount) {
        return Err(ExchangeError::InvalidInput(raw.to_string()));
    }

    Ok(ValidatedAmount(amount))
}
