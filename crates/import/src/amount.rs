use rust_decimal::Decimal;
use std::str::FromStr;
use tally_core::Money;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Malformed amount: {0:?}")]
    Malformed(String),
}

/// Largest number of integer digits accepted. Keeps every value, and any sum
/// of them a statement run can produce, well inside `Decimal`'s exact range.
pub const MAX_INTEGER_DIGITS: usize = 15;

/// Parses statement numbers such as `1,234.44` into exact money values.
///
/// Thousands separators are stripped. Anything else that is not a plain
/// decimal with at most two significant fractional digits and at most
/// [`MAX_INTEGER_DIGITS`] integer digits is rejected.
pub fn parse_amount(s: &str) -> Result<Money, AmountError> {
    let malformed = || AmountError::Malformed(s.to_string());

    let cleaned = s.trim().replace(',', "");
    let unsigned = cleaned.strip_prefix('-').unwrap_or(&cleaned);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(malformed());
    }
    if int_part.trim_start_matches('0').len() > MAX_INTEGER_DIGITS
        || frac_part.trim_end_matches('0').len() > 2
    {
        return Err(malformed());
    }

    let dec = Decimal::from_str(&cleaned).map_err(|_| malformed())?;
    Ok(Money::from_decimal(dec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain() {
        assert_eq!(parse_amount("6.51").unwrap(), Money::from_cents(651));
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(parse_amount("3,947.28").unwrap(), Money::from_cents(394_728));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), Money::from_cents(123_456_789));
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(parse_amount("  12.00 ").unwrap(), Money::from_cents(1200));
    }

    #[test]
    fn whole_number_and_single_decimal() {
        assert_eq!(parse_amount("100").unwrap(), Money::from_cents(10_000));
        assert_eq!(parse_amount("0.5").unwrap(), Money::from_cents(50));
    }

    #[test]
    fn zero() {
        assert!(parse_amount("0.00").unwrap().is_zero());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_amount(""), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_amount(","), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_amount("12.3.4"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_amount("abc"), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn rejects_sub_cent_precision() {
        assert!(matches!(parse_amount("1.005"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_amount("0.001"), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn trailing_zeros_beyond_cents_are_exact() {
        assert_eq!(parse_amount("1.500").unwrap(), Money::from_cents(150));
        assert_eq!(parse_amount("2.0000").unwrap(), Money::from_cents(200));
    }

    #[test]
    fn rejects_values_too_large_to_hold_exactly() {
        // 29 significant digits would otherwise be rounded away silently.
        let err = parse_amount("12345678901234567890123456789.12").unwrap_err();
        assert_eq!(err, AmountError::Malformed("12345678901234567890123456789.12".to_string()));
        assert!(parse_amount("70,000,000,000,000,000,000,000,000,000.00").is_err());
        assert!(parse_amount("1,000,000,000,000,000.00").is_err());
    }

    #[test]
    fn largest_accepted_value() {
        let m = parse_amount("999,999,999,999,999.99").unwrap();
        assert_eq!(m.to_grouped_string(), "999,999,999,999,999.99");
        // Leading zeros do not count towards the limit.
        assert_eq!(parse_amount("0000000000000000001.00").unwrap(), Money::from_cents(100));
    }

    #[test]
    fn sign_and_exponent_forms() {
        assert_eq!(parse_amount("-6.00").unwrap(), Money::from_cents(-600));
        assert!(matches!(parse_amount("1e5"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_amount("+1.00"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_amount(".50"), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn error_keeps_original_text() {
        let err = parse_amount("1,2x").unwrap_err();
        assert_eq!(err, AmountError::Malformed("1,2x".to_string()));
    }

    #[test]
    fn grouped_rendering_parses_back() {
        for cents in [0_i64, 1, 99, 100, 651, 99_999, 100_000, 394_728, 123_456_789, 9_999_999_999] {
            let m = Money::from_cents(cents);
            assert_eq!(parse_amount(&m.to_grouped_string()).unwrap(), m, "cents = {cents}");
        }
    }
}
