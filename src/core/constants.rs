//! The three user-editable numbers that drive every conversion.

use crate::core::amount::parse_decimal;
use anyhow::{Result, bail};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Conversion constants. Replaced wholesale on every settings edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionConstants {
    /// Units of source currency per unit of target currency.
    pub rate: Decimal,
    /// Divisor applied when computing the card price.
    pub card_divisor: Decimal,
    /// Multiplier turning a rate-converted amount into a market price.
    pub market_rate: Decimal,
}

impl ConversionConstants {
    /// Multiplier for the 15% discounted value.
    pub const DISCOUNT_FACTOR: Decimal = dec!(0.85);

    /// Returns a copy with every field whose raw text parses replaced.
    ///
    /// Fields that fail to parse keep their current value, so a partially
    /// invalid edit still applies its valid fields.
    pub fn updated(&self, raw_rate: &str, raw_card_divisor: &str, raw_market_rate: &str) -> Self {
        Self {
            rate: parse_or_keep("rate", raw_rate, self.rate),
            card_divisor: parse_or_keep("card_divisor", raw_card_divisor, self.card_divisor),
            market_rate: parse_or_keep("market_rate", raw_market_rate, self.market_rate),
        }
    }

    /// Fails if any constant is negative.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("rate", self.rate),
            ("card_divisor", self.card_divisor),
            ("market_rate", self.market_rate),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                bail!("Constant {field} must not be negative: {value}");
            }
        }
        Ok(())
    }
}

impl Default for ConversionConstants {
    fn default() -> Self {
        ConversionConstants {
            rate: dec!(372),
            card_divisor: dec!(135),
            market_rate: dec!(1410),
        }
    }
}

/// Parses a single settings field.
///
/// The text is taken as-is: no trimming and no separator stripping.
/// Negative values are rejected.
pub fn parse_constant(raw: &str) -> Result<Decimal> {
    let value = parse_decimal(raw)?;
    if value.is_sign_negative() && !value.is_zero() {
        bail!("Constant must not be negative: {raw}");
    }
    Ok(value)
}

/// Applies a settings edit to `current`. See [`ConversionConstants::updated`].
pub fn update_constants(
    current: &ConversionConstants,
    raw_rate: &str,
    raw_card_divisor: &str,
    raw_market_rate: &str,
) -> ConversionConstants {
    current.updated(raw_rate, raw_card_divisor, raw_market_rate)
}

fn parse_or_keep(field: &str, raw: &str, current: Decimal) -> Decimal {
    match parse_constant(raw) {
        Ok(value) => value,
        Err(e) => {
            debug!(field, error = %e, %current, "Keeping previous constant");
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let constants = ConversionConstants::default();
        assert_eq!(constants.rate, dec!(372));
        assert_eq!(constants.card_divisor, dec!(135));
        assert_eq!(constants.market_rate, dec!(1410));
        assert_eq!(ConversionConstants::DISCOUNT_FACTOR, dec!(0.85));
    }

    #[test]
    fn test_update_keeps_invalid_fields() {
        let current = ConversionConstants::default();

        let updated = update_constants(&current, "bad", "140", "1500.5");
        assert_eq!(updated.rate, dec!(372));
        assert_eq!(updated.card_divisor, dec!(140));
        assert_eq!(updated.market_rate, dec!(1500.5));

        let updated = update_constants(&current, "380", "", "x1");
        assert_eq!(updated.rate, dec!(380));
        assert_eq!(updated.card_divisor, dec!(135));
        assert_eq!(updated.market_rate, dec!(1410));
    }

    #[test]
    fn test_update_all_invalid_is_noop() {
        let current = ConversionConstants {
            rate: dec!(1),
            card_divisor: dec!(2),
            market_rate: dec!(3),
        };
        assert_eq!(current.updated("a", "b", "c"), current);
    }

    #[test]
    fn test_parse_constant_is_strict() {
        assert_eq!(parse_constant("372").unwrap(), dec!(372));
        assert_eq!(parse_constant("0").unwrap(), dec!(0));
        assert_eq!(parse_constant("1e3").unwrap(), dec!(1000));
        assert!(parse_constant(" 372").is_err());
        assert!(parse_constant("1,410").is_err());
        assert!(parse_constant("-5").is_err());
        assert!(parse_constant("").is_err());
    }

    #[test]
    fn test_validate_rejects_negative_fields() {
        assert!(ConversionConstants::default().validate().is_ok());

        let negative = ConversionConstants {
            card_divisor: dec!(-135),
            ..ConversionConstants::default()
        };
        let err = negative.validate().unwrap_err();
        assert!(err.to_string().contains("card_divisor"));

        let zeros = ConversionConstants {
            rate: dec!(0),
            card_divisor: dec!(0),
            market_rate: dec!(0),
        };
        assert!(zeros.validate().is_ok());
    }

    #[test]
    fn test_zero_is_accepted() {
        let updated = ConversionConstants::default().updated("0", "0", "0");
        assert!(updated.rate.is_zero());
        assert!(updated.card_divisor.is_zero());
        assert!(updated.market_rate.is_zero());
    }
}
