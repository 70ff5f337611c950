//! Error taxonomy of the exchange core.
//!
//! None of these are fatal: the engine stays usable after any of them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The quote request failed on the wire, returned a non-success status or an
    /// unparseable body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The quote API answered but flagged the response with `success: false`.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The sending amount is not an integer in the accepted range.
    #[error("Invalid sending amount: '{0}'")]
    InvalidInput(String),

    /// The quote table has no entry for the requested pair code.
    #[error("Exchange rate not available for {0}")]
    RateUnavailable(String),
}
