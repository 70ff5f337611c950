use super::ui;
use crate::core::currency::Currency;
use crate::engine::{ExchangeRateEvent, ExchangeView, ReceivingAmountPhase, ViewState};
use anyhow::{Result, bail};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// Selects `to`, optionally enters `amount`, waits for the engine to settle
/// and prints the resulting view.
pub async fn run(
    view: &dyn ExchangeView,
    to: Currency,
    amount: Option<String>,
    timeout: Duration,
) -> Result<()> {
    if !Currency::RECEIVABLE.contains(&to) {
        bail!(
            "{} cannot be received, choose one of {}",
            to,
            receivable_list()
        );
    }

    if view.is_static() {
        println!("{}", ui::render_view(&view.current()));
        return Ok(());
    }

    let mut updates = view.subscribe();
    let mut notifications = view.notifications();
    let expected_amount = amount.clone().unwrap_or_else(|| view.current().sending_amount);

    view.on_event(ExchangeRateEvent::ReceivingCountryChange(to));
    if let Some(amount) = amount {
        view.on_event(ExchangeRateEvent::SendingAmountChange(amount));
    }

    let spinner = ui::new_spinner("Fetching exchange rate...");
    let outcome = tokio::time::timeout(timeout, async {
        loop {
            let current = updates.borrow_and_update().clone();
            if is_settled(&current, to, &expected_amount) {
                return Ok(current);
            }

            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        bail!("Exchange engine stopped before the rate was available");
                    }
                }
                notification = notifications.recv() => match notification {
                    Ok(notification) => {
                        spinner.suspend(|| eprintln!("{}", ui::render_notification(&notification)));
                        bail!("{notification}");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Missed notifications");
                    }
                    Err(RecvError::Closed) => {
                        bail!("Exchange engine stopped before the rate was available");
                    }
                },
            }
        }
    })
    .await;
    spinner.finish_and_clear();

    let settled = match outcome {
        Ok(result) => result?,
        Err(_) => bail!("Timed out after {:?} waiting for the exchange rate", timeout),
    };

    println!("{}", ui::render_view(&settled));
    Ok(())
}

/// True once the view reflects the requested currency and amount and the
/// quotes for that currency have arrived.
pub fn is_settled(view: &ViewState, to: Currency, amount: &str) -> bool {
    view.receiving_currency == to
        && view.sending_amount == amount
        && !view.exchange_rate.is_empty()
        && view.receiving_amount_phase != ReceivingAmountPhase::Loading
}

fn receivable_list() -> String {
    Currency::RECEIVABLE
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(", ")
}
