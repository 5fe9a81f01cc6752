//! Parsing of the free-form amount text.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses the amount text, reporting why it is not a number.
///
/// Commas are thousands separators and are removed before parsing, along
/// with surrounding whitespace. Blank input is zero.
pub fn try_parse_amount(raw: &str) -> Result<Decimal> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(cleaned)
}

/// Parses the amount text, falling back to zero for anything malformed.
pub fn parse_amount(raw: &str) -> Decimal {
    try_parse_amount(raw).unwrap_or(Decimal::ZERO)
}

/// Strict base-10 parse of `text`, accepting plain and scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Result<Decimal> {
    if text.contains('_') {
        bail!("Invalid decimal: {text}");
    }
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str(text)
    };
    parsed.with_context(|| format!("Invalid decimal: {text}"))
}
