//! Display formatting helpers for the order screen.

use chrono::{DateTime, NaiveDateTime};

use crate::money;

/// Format a decimal-string price in rubles: thousands grouped with spaces,
/// comma decimal separator, trailing zeros dropped (`"1234.50"` ->
/// `"1 234,5 ₽"`). Blank input renders as a dash.
pub fn format_price(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "-".to_string();
    }
    let amount = money::round2(money::parse_amount(raw)).normalize();
    let text = amount.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let digits = int_part.trim_start_matches('-');
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if int_part.starts_with('-') { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac} ₽"),
        None => format!("{sign}{grouped} ₽"),
    }
}

/// Short order id for headers and tables: `#` plus the last eight
/// characters, uppercased.
pub fn format_order_id(order_id: &str) -> String {
    let suffix: String = order_id
        .chars()
        .rev()
        .take(8)
        .collect::<Vec<char>>()
        .into_iter()
        .rev()
        .collect();
    format!("#{}", suffix.to_uppercase())
}

/// Format an ISO-8601 timestamp as `02 May 2025 10:30`. Missing or
/// unparsable input renders as a dash.
pub fn format_date_time(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%d %b %Y %H:%M").to_string();
    }
    // Backend may omit the offset on older records.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%d %b %Y %H:%M").to_string();
    }
    "-".to_string()
}
