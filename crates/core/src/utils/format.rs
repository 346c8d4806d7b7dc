//! Display formatting for amounts and percentages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as whole euros with thousands separators, e.g. `€12,346`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-€{}", grouped)
    } else {
        format!("€{}", grouped)
    }
}

/// Formats a percentage with one decimal, e.g. `80.0%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}
