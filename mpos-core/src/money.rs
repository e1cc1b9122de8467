//! Minor-unit monetary math and wire formatting.
//!
//! Amounts are carried as integer minor units (cents) everywhere inside
//! the core; `rust_decimal` is used only at the edges – computing tax from
//! a fractional percentage rate and rendering the fixed two-decimal
//! strings the gateway requires.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Tax in minor units: half-up rounding of `amount × rate / 100` to the
/// nearest minor unit.
pub fn tax_minor(amount_minor: i64, tax_rate_percent: Decimal) -> i64 {
    let tax = Decimal::from(amount_minor) * tax_rate_percent / Decimal::from(100);
    tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // out of i64 range only for amounts no card network would carry
        .unwrap_or(0)
}

/// Amount plus tax at the given rate.
pub fn total_minor(amount_minor: i64, tax_rate_percent: Decimal) -> i64 {
    amount_minor + tax_minor(amount_minor, tax_rate_percent)
}

/// The fixed two-decimal string the gateway requires (`10825` → `"108.25"`).
pub fn wire_amount(minor: i64) -> String {
    format!("{:.2}", Decimal::new(minor, 2))
}

/// Convert a decimal major-unit amount from the wire into minor units,
/// half-up on sub-cent fractions.
pub fn minor_units(amount: Decimal) -> i64 {
    (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Display formatting for a minor-unit amount in the configured currency.
///
/// Formatting only; there is no conversion. Unknown currency codes are
/// prefixed verbatim.
pub fn format_amount(minor: i64, currency: &str) -> String {
    let value = wire_amount(minor);
    match currency {
        "USD" => format!("${value}"),
        "EUR" => format!("€{value}"),
        "GBP" => format!("£{value}"),
        other => format!("{other} {value}"),
    }
}
