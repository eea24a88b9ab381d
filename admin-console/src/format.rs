//! Display formatting for money, counts and dates

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// US-dollar amount with two decimals and thousands separators, e.g. `$1,234.50`
pub fn format_currency(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{rounded:.2}");
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Integer with thousands separators, e.g. `12,345`
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// `Jan 5, 2025`, or `-` when there is no date
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "-".to_string(),
    }
}

/// Percentage with one decimal, e.g. `12.5%`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Upper-cased first letter of `name`, `U` when there is none
pub fn initials(name: Option<&str>) -> String {
    name.and_then(|n| n.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
