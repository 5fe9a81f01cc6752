//! Provides the price conversion formulas.
use crate::core::amount::parse_amount;
use crate::core::constants::ConversionConstants;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt::Display;
use tracing::{debug, warn};

/// Fractional digits kept after every division.
pub const DIVISION_SCALE: u32 = 10;

const SCALE_FACTOR: Decimal = dec!(10000000000);

/// Identifies one of the four derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Usd,
    IqdCard,
    IqdMarket,
    AfterDiscount,
}

impl ResultKind {
    pub const ALL: [ResultKind; 4] = [
        ResultKind::Usd,
        ResultKind::IqdCard,
        ResultKind::IqdMarket,
        ResultKind::AfterDiscount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::Usd => "Price in target currency",
            ResultKind::IqdCard => "Value by card",
            ResultKind::IqdMarket => "Value at market rate",
            ResultKind::AfterDiscount => "After rate and 15% discount",
        }
    }

    /// The currency suffix shown next to the value, if any.
    pub fn currency<'a>(&self, source: &'a str, target: &'a str) -> Option<&'a str> {
        match self {
            ResultKind::Usd => Some(target),
            ResultKind::IqdCard | ResultKind::IqdMarket => Some(source),
            ResultKind::AfterDiscount => None,
        }
    }
}

impl Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResultKind::Usd => "usd",
                ResultKind::IqdCard => "iqd_card",
                ResultKind::IqdMarket => "iqd_market",
                ResultKind::AfterDiscount => "after_discount",
            }
        )
    }
}

/// The four values derived from one amount and one set of constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionResult {
    pub usd: Decimal,
    pub iqd_card: Decimal,
    pub iqd_market: Decimal,
    pub after_discount: Decimal,
}

impl ConversionResult {
    pub fn get(&self, kind: ResultKind) -> Decimal {
        match kind {
            ResultKind::Usd => self.usd,
            ResultKind::IqdCard => self.iqd_card,
            ResultKind::IqdMarket => self.iqd_market,
            ResultKind::AfterDiscount => self.after_discount,
        }
    }

    /// Values in display order.
    pub fn entries(&self) -> [(ResultKind, Decimal); 4] {
        ResultKind::ALL.map(|kind| (kind, self.get(kind)))
    }
}

/// Computes all four values for `amount`.
///
/// Every division is rounded half away from zero to [`DIVISION_SCALE`]
/// digits; products are kept at full precision. A zero rate or zero card
/// divisor yields zero for the values that divide by it. This never panics:
/// overflow also degrades to zero.
pub fn convert(amount: Decimal, constants: &ConversionConstants) -> ConversionResult {
    let (usd, iqd_market, after_discount) = if constants.rate.is_zero() {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    } else {
        let usd = divide_rounded(amount, constants.rate);
        (
            or_zero(ResultKind::Usd, usd),
            or_zero(
                ResultKind::IqdMarket,
                usd.and_then(|u| u.checked_mul(constants.market_rate)),
            ),
            or_zero(
                ResultKind::AfterDiscount,
                usd.and_then(|u| u.checked_mul(ConversionConstants::DISCOUNT_FACTOR)),
            ),
        )
    };

    let iqd_card = if constants.card_divisor.is_zero() {
        Decimal::ZERO
    } else {
        or_zero(
            ResultKind::IqdCard,
            amount
                .checked_mul(constants.rate)
                .and_then(|product| divide_rounded(product, constants.card_divisor)),
        )
    };

    ConversionResult {
        usd,
        iqd_card,
        iqd_market,
        after_discount,
    }
}

/// Parses `raw` with [`parse_amount`] and converts it.
pub fn convert_text(raw: &str, constants: &ConversionConstants) -> ConversionResult {
    let amount = parse_amount(raw);
    debug!(raw, %amount, "Converting amount");
    convert(amount, constants)
}

/// `dividend / divisor` rounded half away from zero from the exact quotient.
///
/// Works on `dividend * 10^DIVISION_SCALE` with an exact remainder so the
/// 28 digit limit of `checked_div` never rounds before the final digit.
fn divide_rounded(dividend: Decimal, divisor: Decimal) -> Option<Decimal> {
    let Some(scaled) = dividend.checked_mul(SCALE_FACTOR) else {
        // Only dividends above ~7.9e18; the quotient still carries far more
        // than DIVISION_SCALE digits.
        return dividend.checked_div(divisor).map(|quotient| {
            quotient.round_dp_with_strategy(DIVISION_SCALE, RoundingStrategy::MidpointAwayFromZero)
        });
    };

    // Remainder takes the sign of the dividend, so this truncates.
    let remainder = scaled.checked_rem(divisor)?;
    let mut quotient = scaled.checked_sub(remainder)?.checked_div(divisor)?.round().normalize();
    if remainder.abs().checked_mul(Decimal::TWO)? >= divisor.abs() {
        let step = if scaled.is_sign_negative() != divisor.is_sign_negative() {
            Decimal::NEGATIVE_ONE
        } else {
            Decimal::ONE
        };
        quotient = quotient.checked_add(step)?;
    }

    quotient.set_scale(quotient.scale() + DIVISION_SCALE).ok()?;
    Some(quotient)
}

fn or_zero(kind: ResultKind, value: Option<Decimal>) -> Decimal {
    value.unwrap_or_else(|| {
        warn!(result = %kind, "Decimal overflow, using zero");
        Decimal::ZERO
    })
}
