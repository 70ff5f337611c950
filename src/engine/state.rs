//! The exchange state machine.
//!
//! `ExchangeState` is a synchronous reducer: every input (a UI event or a
//! finished fetch) mutates the state and returns the effects the driver has to
//! carry out. Each recomputation re-derives the receiving amount from the raw
//! inputs and the last known quote table, nothing is patched incrementally.
//!
//! Fetches are tagged with a generation number. Only the completion of the most
//! recently issued fetch is applied, so a slow response for a previously
//! selected currency can never overwrite the current one.

use super::model::{ExchangeRateEvent, Notification, ReceivingAmountPhase, ViewState};
use crate::core::currency::Currency;
use crate::core::error::ExchangeError;
use crate::core::format::{format_amount, format_rate, format_timestamp};
use crate::core::quote::QuoteTable;
use crate::core::rate::resolve_rate;
use crate::core::validate::validate_amount;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { generation: u64 },
    Notify(Notification),
}

#[derive(Debug, Default)]
pub struct ExchangeState {
    view: ViewState,
    last_quotes: Option<QuoteTable>,
    generation: u64,
}

impl ExchangeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn last_quotes(&self) -> Option<&QuoteTable> {
        self.last_quotes.as_ref()
    }

    /// Generation of the most recently issued fetch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests quotes for the initial receiving currency.
    pub fn start(&mut self) -> Vec<Effect> {
        self.request_quotes()
    }

    pub fn handle_event(&mut self, event: ExchangeRateEvent) -> Vec<Effect> {
        match event {
            ExchangeRateEvent::ReceivingCountryChange(currency) => {
                self.change_receiving_currency(currency)
            }
            ExchangeRateEvent::SendingAmountChange(amount) => self.change_sending_amount(amount),
        }
    }

    pub fn handle_fetch_result(
        &mut self,
        generation: u64,
        result: Result<QuoteTable, ExchangeError>,
    ) -> Vec<Effect> {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale quote response"
            );
            return Vec::new();
        }

        match result {
            Ok(table) => {
                debug!(generation, captured_at = table.captured_at, "Applying quotes");
                let from = self.view.sending_currency;
                let to = self.view.receiving_currency;
                match resolve_rate(&table, from, to) {
                    Ok(rate) => self.view.exchange_rate = format_rate(rate),
                    Err(e) => debug!("Leaving exchange rate unset: {e}"),
                }
                self.view.lookup_time = format_timestamp(table.captured_at);
                self.last_quotes = Some(table);
                self.recompute()
            }
            Err(e) => {
                warn!(generation, error = %e, "Quote fetch failed");
                vec![Effect::Notify(Notification::ShowMessage(e.to_string()))]
            }
        }
    }

    fn change_receiving_currency(&mut self, currency: Currency) -> Vec<Effect> {
        if currency == self.view.receiving_currency {
            debug!(%currency, "Receiving currency unchanged");
            return Vec::new();
        }
        self.view.receiving_currency = currency;
        self.view.exchange_rate.clear();
        self.view.receiving_amount.clear();
        self.request_quotes()
    }

    fn change_sending_amount(&mut self, amount: String) -> Vec<Effect> {
        self.view.sending_amount = amount;
        self.recompute()
    }

    fn request_quotes(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.view.receiving_amount_phase = ReceivingAmountPhase::Loading;
        vec![Effect::Fetch {
            generation: self.generation,
        }]
    }

    fn recompute(&mut self) -> Vec<Effect> {
        let Some(table) = &self.last_quotes else {
            debug!("No quotes yet, nothing to compute");
            return Vec::new();
        };

        match receiving_amount(table, &self.view) {
            Ok(display) => {
                self.view.receiving_amount = display;
                self.view.receiving_amount_phase = ReceivingAmountPhase::Success;
                Vec::new()
            }
            Err(ExchangeError::InvalidInput(raw)) => {
                debug!(%raw, "Rejected sending amount");
                self.view.receiving_amount_phase = ReceivingAmountPhase::Error;
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not compute receiving amount");
                vec![Effect::Notify(Notification::ShowMessage(e.to_string()))]
            }
        }
    }
}

fn receiving_amount(table: &QuoteTable, view: &ViewState) -> Result<String, ExchangeError> {
    let amount = validate_amount(&view.sending_amount)?;
    let rate = resolve_rate(table, view.sending_currency, view.receiving_currency)?;
    Ok(format!(
        "{} {}",
        format_amount(rate * amount.value() as f64),
        view.receiving_currency
    ))
}
