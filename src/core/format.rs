//! Display formatting for rates, amounts and lookup times

use chrono::{Local, TimeZone};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

const DISPLAY_DECIMALS: u32 = 2;
const LOOKUP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats a rate as `#,##0.00`, rounding half-up.
pub fn format_rate(value: f64) -> String {
    format_decimal(value)
}

/// Formats an amount with the same pattern as [`format_rate`].
pub fn format_amount(value: f64) -> String {
    format_decimal(value)
}

/// Formats epoch seconds as `YYYY-MM-DD HH:mm` in the local time zone.
pub fn format_timestamp(epoch_seconds: i64) -> String {
    format_timestamp_in(epoch_seconds, &Local)
}

pub fn format_timestamp_in<Tz>(epoch_seconds: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_opt(epoch_seconds, 0)
        .single()
        .map(|dt| dt.format(LOOKUP_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn format_decimal(value: f64) -> String {
    // Decimal goes through the shortest decimal representation of the float, so
    // ties round the way they read (0.125 -> 0.13), unlike `{:.2}`.
    let Some(decimal) = Decimal::from_f64(value) else {
        return format!("{value:.2}");
    };
    let mut rounded =
        decimal.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMALS);
    group_thousands(&rounded.to_string())
}

fn group_thousands(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
