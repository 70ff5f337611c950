use super::ui::{self, StyleType};
use crate::core::currency::Currency;
use crate::engine::{ExchangeRateEvent, ExchangeView};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectCurrency(Currency),
    EnterAmount(String),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Reads commands from stdin and redraws the view whenever it changes.
pub async fn run(view: &dyn ExchangeView) -> Result<()> {
    let mut updates = view.subscribe();
    let mut notifications = view.notifications();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    println!("{}", ui::render_view(&updates.borrow_and_update()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed");
                    break;
                };
                match parse_command(&line) {
                    Command::SelectCurrency(currency) => {
                        view.on_event(ExchangeRateEvent::ReceivingCountryChange(currency));
                    }
                    Command::EnterAmount(amount) => {
                        view.on_event(ExchangeRateEvent::SendingAmountChange(amount));
                    }
                    Command::Show => println!("{}", ui::render_view(&view.current())),
                    Command::Help => print_help(),
                    Command::Quit => break,
                    Command::Invalid(message) => {
                        println!("{}", ui::style_text(&message, StyleType::Error));
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    debug!("View channel closed");
                    break;
                }
                println!("{}", ui::render_view(&updates.borrow_and_update()));
            }
            notification = notifications.recv() => match notification {
                Ok(notification) => println!("{}", ui::render_notification(&notification)),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Missed notifications"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

/// Parses one input line. Anything that is not a known command is taken as a
/// new sending amount, verbatim.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "to" => match rest.parse::<Currency>() {
            Ok(currency) if Currency::RECEIVABLE.contains(&currency) => {
                Command::SelectCurrency(currency)
            }
            Ok(currency) => Command::Invalid(format!("{currency} cannot be received")),
            Err(e) => Command::Invalid(e.to_string()),
        },
        "amount" => Command::EnterAmount(rest.to_string()),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::EnterAmount(line.to_string()),
    }
}

fn print_help() {
    let receivable = Currency::RECEIVABLE
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join("|");
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Commands: to <{receivable}>, amount <value>, show, help, quit. Any other input sets the sending amount."
            ),
            StyleType::Subtle
        )
    );
}
