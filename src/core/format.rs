//! Display formatting for converted values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum fractional digits shown.
pub const DISPLAY_SCALE: u32 = 6;

/// Formats `value` with `,` grouping and at most six fractional digits.
///
/// Rounds half to even, trims trailing fractional zeros and never prints a
/// bare decimal point. Output does not depend on the process locale.
pub fn format_decimal(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven)
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut output = String::with_capacity(text.len() + text.len() / 3 + 1);
    if rounded.is_sign_negative() {
        output.push('-');
    }
    output.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        output.push('.');
        output.push_str(frac);
    }
    output
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integers_have_no_decimal_point() {
        assert_eq!(format_decimal(dec!(0)), "0");
        assert_eq!(format_decimal(dec!(7)), "7");
        assert_eq!(format_decimal(dec!(999)), "999");
        assert_eq!(format_decimal(dec!(1000)), "1,000");
        assert_eq!(format_decimal(dec!(123456)), "123,456");
        assert_eq!(format_decimal(dec!(1234567)), "1,234,567");
        assert_eq!(format_decimal(dec!(1410.0000000000)), "1,410");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(format_decimal(dec!(1000.500000)), "1,000.5");
        assert_eq!(format_decimal(dec!(0.8500)), "0.85");
    }

    #[test]
    fn test_six_fractional_digits() {
        assert_eq!(format_decimal(dec!(1025.0666666667)), "1,025.066667");
        assert_eq!(format_decimal(dec!(3790.322580630)), "3,790.322581");
        assert_eq!(format_decimal(dec!(2.28494623655)), "2.284946");
        assert_eq!(format_decimal(dec!(0.0000004)), "0");
    }

    #[test]
    fn test_rounds_half_to_even() {
        assert_eq!(format_decimal(dec!(0.0000005)), "0");
        assert_eq!(format_decimal(dec!(0.0000015)), "0.000002");
        assert_eq!(format_decimal(dec!(0.0000025)), "0.000002");
        assert_eq!(format_decimal(dec!(0.00000251)), "0.000003");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_decimal(dec!(-1234567.5)), "-1,234,567.5");
        assert_eq!(format_decimal(dec!(-0.0000001)), "0");
    }
}
