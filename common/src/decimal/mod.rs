//! Decimal type utilities for precise monetary calculations

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Quantity of units on a sale line
pub type Quantity = Decimal;

/// Unit price in the sale currency
pub type Price = Decimal;

/// Monetary amount (typically Price * Quantity)
pub type Amount = Decimal;

/// Percentage rate (19 means 19%)
pub type Rate = Decimal;

/// Precision helpers for common operations
pub mod precision {
    use super::*;
    use rust_decimal::RoundingStrategy;

    /// Monetary precision (2 decimal places)
    pub const MONEY_PRECISION: u32 = 2;

    /// Round a monetary amount to 2 decimal places.
    ///
    /// Ties round toward positive infinity, the same as
    /// `floor(x * 100 + 0.5) / 100`: `2.345 -> 2.35`, `-2.345 -> -2.34`.
    pub fn round_money(amount: Amount) -> Amount {
        let strategy = if amount.is_sign_negative() {
            RoundingStrategy::MidpointTowardZero
        } else {
            RoundingStrategy::MidpointAwayFromZero
        };
        amount.round_dp_with_strategy(MONEY_PRECISION, strategy)
    }
}

/// Parse user-entered text into a decimal, coercing anything unusable to zero.
///
/// Mirrors how the sales screen reads its inputs: leading whitespace is
/// skipped and the longest numeric prefix is taken, so `"12abc"` is 12,
/// `".5"` is 0.5 and `"1e3"` is 1000. Empty input, text without a numeric
/// prefix, `NaN`, `Infinity` and values outside the decimal range are 0.
pub fn parse_lenient(input: &str) -> Decimal {
    let prefix = numeric_prefix(input.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    // ".5" and "-.5" need a leading zero
    let text = match prefix.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{}", rest),
        _ if prefix.starts_with('.') => format!("0{}", prefix),
        _ => prefix.to_string(),
    };

    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text)
    } else {
        text.parse::<Decimal>()
    };

    parsed.unwrap_or(Decimal::ZERO)
}

/// Longest prefix of `s` shaped like `[+-]?(digits)?(.digits)?([eE][+-]?digits)?`
/// that contains at least one mantissa digit.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if frac_digits > 0 {
            end = frac_end;
        }
        digits += frac_digits;
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when it has digits of its own
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    // Drop a lone leading "+": Decimal's parser rejects it
    let prefix = &s[..end];
    prefix.strip_prefix('+').unwrap_or(prefix)
}

/// Serde helpers that accept numbers, numeric strings, garbage and null
/// for decimal fields, coercing with [`parse_lenient`].
pub mod serde_lenient {
    use super::*;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(serde_json::Number),
        Text(String),
        Other(serde_json::Value),
    }

    fn coerce(value: Option<Loose>) -> Decimal {
        match value {
            Some(Loose::Number(n)) => parse_lenient(&n.to_string()),
            Some(Loose::Text(s)) => parse_lenient(&s),
            // Booleans, arrays and objects have no numeric prefix
            Some(Loose::Other(_)) | None => Decimal::ZERO,
        }
    }

    /// Deserialize a decimal leniently; null and garbage become 0
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Loose>::deserialize(deserializer)?;
        Ok(coerce(value))
    }
}
