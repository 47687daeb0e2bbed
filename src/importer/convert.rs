//! Typed conversion of field views.
//!
//! Parsers return a [`FieldError`] describing what was wrong with the text;
//! the importer attaches source, line and column before surfacing it.

use crate::error::FieldError;

/// Parse a base-10 unsigned integer occupying the whole field.
pub fn parse_integer(text: &str) -> Result<u32, FieldError> {
    Ok(text.parse::<u32>()?)
}

/// Parse decimal text into an unsigned integer scaled by `10^scale`.
///
/// The product is truncated toward zero, not rounded, so binary
/// representation error can land one unit low (`0.29` becomes `28`).
pub fn parse_scaled_decimal(text: &str, scale: u32) -> Result<u32, FieldError> {
    let value = text.parse::<f64>()?;

    if !value.is_finite() {
        return Err(FieldError::NonFinite);
    }
    if (value == 0.0 || value.is_subnormal()) && has_nonzero_mantissa(text) {
        return Err(FieldError::Underflow);
    }

    let scaled = value * 10f64.powi(scale as i32);
    if scaled < 0.0 || scaled >= u32::MAX as f64 + 1.0 {
        return Err(FieldError::ScaledOutOfRange(scaled));
    }
    Ok(scaled as u32)
}

// Any non-zero digit before the exponent marker
fn has_nonzero_mantissa(text: &str) -> bool {
    text.bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("0"), Ok(0));
        assert_eq!(parse_integer("155190"), Ok(155190));
        assert_eq!(parse_integer("4294967295"), Ok(u32::MAX));
    }

    #[test]
    fn test_integer_rejects_garbage() {
        for bad in ["", "abc", "12a", "1.5", "-1", " 7", "7 "] {
            assert!(
                matches!(parse_integer(bad), Err(FieldError::Integer(_))),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_integer_overflow() {
        assert!(matches!(
            parse_integer("4294967296"),
            Err(FieldError::Integer(_))
        ));
    }

    #[test]
    fn test_scaled_decimal_values() {
        assert_eq!(parse_scaled_decimal("150.50", 2), Ok(15050));
        assert_eq!(parse_scaled_decimal("0.05", 2), Ok(5));
        assert_eq!(parse_scaled_decimal("0.08", 2), Ok(8));
        assert_eq!(parse_scaled_decimal("100.25", 2), Ok(10025));
        assert_eq!(parse_scaled_decimal("7", 2), Ok(700));
        assert_eq!(parse_scaled_decimal("0.00", 2), Ok(0));
    }

    #[test]
    fn test_scaled_decimal_truncates() {
        // 0.29 * 100 == 28.999999999999996 in binary floating point
        assert_eq!(parse_scaled_decimal("0.29", 2), Ok(28));
        assert_eq!(parse_scaled_decimal("1.15", 2), Ok(114));
        assert_eq!(parse_scaled_decimal("0.129", 2), Ok(12));
    }

    #[test]
    fn test_scaled_decimal_other_scales() {
        assert_eq!(parse_scaled_decimal("1.5", 0), Ok(1));
        assert_eq!(parse_scaled_decimal("1.5", 3), Ok(1500));
    }

    #[test]
    fn test_scaled_decimal_rejects_garbage() {
        for bad in ["", "abc", "1.2.3", "12x", "0.05 "] {
            assert!(
                matches!(parse_scaled_decimal(bad, 2), Err(FieldError::Decimal(_))),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_scaled_decimal_overflow() {
        assert_eq!(parse_scaled_decimal("1e400", 2), Err(FieldError::NonFinite));
        assert_eq!(parse_scaled_decimal("inf", 2), Err(FieldError::NonFinite));
        assert_eq!(parse_scaled_decimal("NaN", 2), Err(FieldError::NonFinite));
    }

    #[test]
    fn test_scaled_decimal_underflow() {
        assert_eq!(parse_scaled_decimal("1e-400", 2), Err(FieldError::Underflow));
        assert_eq!(parse_scaled_decimal("0e-400", 2), Ok(0));
    }

    #[test]
    fn test_scaled_decimal_out_of_range() {
        assert!(matches!(
            parse_scaled_decimal("-0.05", 2),
            Err(FieldError::ScaledOutOfRange(_))
        ));
        assert!(matches!(
            parse_scaled_decimal("50000000", 2),
            Err(FieldError::ScaledOutOfRange(_))
        ));
        assert_eq!(parse_scaled_decimal("-0.00", 2), Ok(0));
    }
}
