//! Decimal-string price arithmetic.
//!
//! Prices cross the wire as decimal strings (`"650.00"`). All local
//! arithmetic goes through `rust_decimal` so the display totals computed
//! during an editing session never pick up binary floating-point noise.
//! These values are display-only: the backend's returned totals stay
//! authoritative.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::warn;

/// Decimal places used for all monetary amounts.
const MONEY_SCALE: u32 = 2;

/// Parse a decimal-string amount.
///
/// Unparsable input is treated as zero: the backend owns price validation,
/// and a broken string should degrade the display rather than wedge the
/// editing session.
pub fn parse_amount(raw: &str) -> Decimal {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) => amount,
        Err(_) => {
            warn!(raw = %raw, "unparsable amount, treating as zero");
            Decimal::ZERO
        }
    }
}

/// Round to two decimal places, midpoint away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount in the backend's two-decimal string form.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round2(amount))
}

/// Line total for one item: `round2(unit price * quantity)` as a string.
pub fn line_total(unit_price: &str, quantity: u32) -> String {
    format_amount(parse_amount(unit_price) * Decimal::from(quantity))
}

/// Sum of line-total strings as a two-decimal string.
pub fn sum_totals<'a, I>(totals: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    format_amount(totals.into_iter().map(parse_amount).sum::<Decimal>())
}
