//! Price text formatting with value-dependent precision

use super::quote::CellField;

/// Format a price with decimal places scaled to the magnitude of the value:
/// large prices get fewer decimals, small prices get more.
pub fn format_price(value: f64) -> String {
    let decimals: usize = if value > 9999.0 {
        3
    } else if value >= 999.0 {
        4
    } else if value >= 99.0 {
        5
    } else {
        6
    };

    let mut text = format!("{value:.decimals$}");
    // Trailing zeros stay; only a dangling decimal point is removed.
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Render a cell for display: numbers are price-formatted, raw text passes
/// through untouched, empty cells render as the empty string.
pub fn format_field(field: &CellField) -> String {
    match field {
        CellField::Number(value) => format_price(*value),
        CellField::Text(text) => text.clone(),
        CellField::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_scales_with_magnitude() {
        assert_eq!(format_price(12345.6789), "12345.679");
        assert_eq!(format_price(500.123456), "500.1235");
        assert_eq!(format_price(50.123456), "50.12346");
        assert_eq!(format_price(5.123456), "5.123456");
    }

    #[test]
    fn test_boundaries() {
        // The thresholds are deliberately uneven: > 9999 but >= 999 / >= 99.
        assert_eq!(format_price(9999.0), "9999.0000");
        assert_eq!(format_price(10000.0), "10000.000");
        assert_eq!(format_price(999.0), "999.0000");
        assert_eq!(format_price(99.0), "99.00000");
        assert_eq!(format_price(98.9), "98.900000");
    }

    #[test]
    fn test_trailing_zeros_kept() {
        assert_eq!(format_price(1.25), "1.250000");
        assert_eq!(format_price(0.0), "0.000000");
    }

    #[test]
    fn test_negative_values_use_smallest_bucket() {
        assert_eq!(format_price(-1.5), "-1.500000");
    }

    #[test]
    fn test_field_rendering() {
        assert_eq!(format_field(&CellField::Number(1.2)), "1.200000");
        assert_eq!(format_field(&CellField::Text("n/a".into())), "n/a");
        assert_eq!(format_field(&CellField::Empty), "");
    }
}
