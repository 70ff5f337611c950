use crate::core::currency::Currency;
use crate::engine::{Notification, ReceivingAmountPhase, ViewState};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(text: &str) -> Cell {
    if text.is_empty() {
        Cell::new("-")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(text).set_alignment(CellAlignment::Right)
    }
}

/// Display name of the country a currency belongs to.
pub fn country_label(currency: Currency) -> &'static str {
    match currency {
        Currency::KRW => "Korea",
        Currency::JPY => "Japan",
        Currency::PHP => "Philippines",
        Currency::USD => "USA",
    }
}

pub fn country_currency(currency: Currency) -> String {
    format!("{} ({})", country_label(currency), currency)
}

/// Renders the whole view: the field table followed by the receiving amount.
pub fn render_view(view: &ViewState) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);

    let exchange_rate = if view.exchange_rate.is_empty() {
        String::new()
    } else {
        format!(
            "{} {} / {}",
            view.exchange_rate, view.receiving_currency, view.sending_currency
        )
    };
    let sending_amount = format!("{} {}", view.sending_amount, view.sending_currency);

    table.add_row(vec![
        Cell::new("Sending country"),
        value_cell(&country_currency(view.sending_currency)),
    ]);
    table.add_row(vec![
        Cell::new("Receiving country"),
        value_cell(&country_currency(view.receiving_currency)),
    ]);
    table.add_row(vec![Cell::new("Exchange rate"), value_cell(&exchange_rate)]);
    table.add_row(vec![Cell::new("Lookup time"), value_cell(&view.lookup_time)]);
    table.add_row(vec![Cell::new("Sending amount"), value_cell(&sending_amount)]);

    let mut output = format!(
        "{}\n\n",
        style_text("Exchange Rate Calculator", StyleType::Title)
    );
    output.push_str(&table.to_string());

    let footer = receiving_amount_footer(view);
    if !footer.is_empty() {
        output.push_str("\n\n");
        output.push_str(&footer);
    }
    output
}

fn receiving_amount_footer(view: &ViewState) -> String {
    match view.receiving_amount_phase {
        ReceivingAmountPhase::Loading => {
            style_text("Fetching exchange rate...", StyleType::Subtle)
        }
        ReceivingAmountPhase::Error => style_text("Invalid remittance amount", StyleType::Error),
        ReceivingAmountPhase::Success if view.receiving_amount.is_empty() => String::new(),
        ReceivingAmountPhase::Success => format!(
            "{} {}",
            style_text("Receiving amount:", StyleType::Label),
            style_text(&view.receiving_amount, StyleType::Value)
        ),
    }
}

pub fn render_notification(notification: &Notification) -> String {
    style_text(&notification.to_string(), StyleType::Error)
}

/// Creates a spinner shown while quotes are being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
