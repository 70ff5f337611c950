//! Types shared between the engine and whatever renders it

use crate::core::currency::Currency;
use std::fmt::Display;

pub const DEFAULT_SENDING_AMOUNT: &str = "100";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceivingAmountPhase {
    Loading,
    Success,
    Error,
}

/// Everything the UI observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sending_currency: Currency,
    pub receiving_currency: Currency,
    pub exchange_rate: String,
    pub lookup_time: String,
    /// Exactly what the user typed, valid or not.
    pub sending_amount: String,
    pub receiving_amount: String,
    pub receiving_amount_phase: ReceivingAmountPhase,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            sending_currency: Currency::USD,
            receiving_currency: Currency::KRW,
            exchange_rate: String::new(),
            lookup_time: String::new(),
            sending_amount: DEFAULT_SENDING_AMOUNT.to_string(),
            receiving_amount: String::new(),
            receiving_amount_phase: ReceivingAmountPhase::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRateEvent {
    ReceivingCountryChange(Currency),
    SendingAmountChange(String),
}

/// One-shot message for the UI; never replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ShowMessage(String),
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::ShowMessage(message) => write!(f, "{message}"),
        }
    }
}
