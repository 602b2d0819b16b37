//! Number formatting for the display

/// Default number of fractional digits shown
pub const DEFAULT_DECIMAL_PLACES: usize = 7;

/// Text shown for non-finite values and failed evaluations
pub const ERROR_TEXT: &str = "Error";

/// Formats a value with [`DEFAULT_DECIMAL_PLACES`]
#[must_use]
pub fn format_number(value: f64) -> String {
    format_number_with(value, DEFAULT_DECIMAL_PLACES)
}

/// Formats a value for display
///
/// Integral values have no decimal point. Fractional values are rounded to
/// `decimal_places` digits with trailing zeros and a trailing `.` removed.
/// NaN and infinities render as `"Error"`.
#[must_use]
pub fn format_number_with(value: f64, decimal_places: usize) -> String {
    if !value.is_finite() {
        return ERROR_TEXT.to_string();
    }

    let text = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let formatted = format!("{value:.decimal_places$}");
        if formatted.contains('.') {
            formatted
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            formatted
        }
    };

    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Shortest plain-decimal text for a value, used to refill the input buffer
///
/// Never uses exponent notation; negative zero becomes `"0"`.
#[must_use]
pub fn trim_decimal(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== format_number =====

    #[test]
    fn test_format_integer() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-42.0), "-42");
    }

    #[test]
    fn test_format_one_third() {
        assert_eq!(format_number(1.0 / 3.0), "0.3333333");
    }

    #[test]
    fn test_format_two_thirds_rounds() {
        assert_eq!(format_number(2.0 / 3.0), "0.6666667");
    }

    #[test]
    fn test_format_trailing_zeros() {
        assert_eq!(format_number(1.50), "1.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_format_tiny_collapses_to_zero() {
        assert_eq!(format_number(1e-9), "0");
        assert_eq!(format_number(-1e-9), "0");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_large_integer() {
        assert_eq!(format_number(1e14), "100000000000000");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_nan_and_infinity() {
        assert_eq!(format_number(f64::NAN), "Error");
        assert_eq!(format_number(f64::INFINITY), "Error");
        assert_eq!(format_number(f64::NEG_INFINITY), "Error");
    }

    #[test]
    fn test_format_custom_places() {
        assert_eq!(format_number_with(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_number_with(1.0 / 3.0, 10), "0.3333333333");
    }

    #[test]
    fn test_format_zero_places() {
        assert_eq!(format_number_with(20.25, 0), "20");
    }

    // ===== trim_decimal =====

    #[test]
    fn test_trim_decimal() {
        assert_eq!(trim_decimal(0.5), "0.5");
        assert_eq!(trim_decimal(2.0), "2");
        assert_eq!(trim_decimal(-0.05), "-0.05");
        assert_eq!(trim_decimal(0.0000001), "0.0000001");
    }

    #[test]
    fn test_trim_decimal_negative_zero() {
        assert_eq!(trim_decimal(-0.0), "0");
    }

    #[test]
    fn test_trim_decimal_round_trips() {
        for value in [0.125, 12.5, -3.75, 1234.5678] {
            assert_eq!(trim_decimal(value).parse::<f64>().unwrap(), value);
        }
    }
}
