//! Fixed-point conversion between human amounts and smallest units
//!
//! Both directions work on decimal strings and [`U256`] only; no floating
//! point is involved at any step.

use alloy::primitives::U256;

use crate::errors::{OathstoneError, Result};

/// Formats a smallest-unit amount with `decimals` fractional digits
///
/// Trailing zeros are trimmed but at least one fractional digit is kept:
/// `1500000000000000000` at 18 decimals is `"1.5"`, zero is `"0.0"`.
pub fn format_amount(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;

    let (whole, fraction) = if digits.len() > decimals {
        let (whole, fraction) = digits.split_at(digits.len() - decimals);
        (whole.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), format!("{}{}", "0".repeat(decimals - digits.len()), digits))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Scales a human decimal amount by `10^decimals`
///
/// Accepts plain decimal notation (`"5"`, `"5.5"`, `".5"`, `"5."`). Fails with
/// `InvalidAmount` when the input is malformed or negative, when it carries
/// more significant fractional digits than `decimals`, or when the result
/// does not fit 256 bits.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256> {
    let invalid = |reason: &str| OathstoneError::InvalidAmount {
        amount: amount.to_string(),
        decimals,
        reason: reason.to_string(),
    };

    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(invalid("amount must not be negative"));
    }
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("amount is empty"));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }

    let significant = fraction.trim_end_matches('0');
    if significant.len() > decimals as usize {
        return Err(invalid("amount is finer than the smallest unit"));
    }

    let overflow = || invalid("amount does not fit in 256 bits");
    let scale = pow10(decimals as usize).ok_or_else(overflow)?;
    let whole_value = parse_digits(whole).ok_or_else(overflow)?;
    let fraction_value = parse_digits(significant)
        .zip(pow10(decimals as usize - significant.len()))
        .and_then(|(value, scale)| value.checked_mul(scale))
        .ok_or_else(overflow)?;

    whole_value
        .checked_mul(scale)
        .and_then(|value| value.checked_add(fraction_value))
        .ok_or_else(overflow)
}

fn parse_digits(digits: &str) -> Option<U256> {
    if digits.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).ok()
}

fn pow10(exponent: usize) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exponent))
}
