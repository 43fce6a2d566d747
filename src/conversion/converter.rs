//! Conversion entry points
//!
//! Parses the raw input, resolves the (category, from, to) triple and
//! formats the result for display.

use serde::Serialize;
use thiserror::Error;

use super::temperature::{convert_temperature, TemperatureScale};
use super::units::{Category, ConversionTable};

/// Why a conversion produced no value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Please enter a valid number")]
    InvalidInput { raw: String },

    #[error("Converting {from} to {to} is not supported for {category}")]
    UnsupportedConversion {
        category: String,
        from: String,
        to: String,
    },
}

impl ConversionError {
    /// Stable machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            ConversionError::InvalidInput { .. } => "invalid_input",
            ConversionError::UnsupportedConversion { .. } => "unsupported_pair",
        }
    }

    fn unsupported(category: &str, from: &str, to: &str) -> Self {
        ConversionError::UnsupportedConversion {
            category: category.trim().to_string(),
            from: from.trim().to_string(),
            to: to.trim().to_string(),
        }
    }
}

/// A successful conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub category: Category,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
    /// Input text as entered, trimmed
    pub input: String,
    pub input_value: f64,
    /// Unrounded result
    pub value: f64,
    /// Result with exactly two decimals
    pub display: String,
    pub sentence: String,
}

/// Parse user-entered text as a finite decimal number
pub fn parse_value(raw: &str) -> Result<f64, ConversionError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConversionError::InvalidInput {
            raw: raw.to_string(),
        }),
    }
}

/// Format a value in fixed-point notation with two decimals
///
/// A result that rounds to zero is never shown as "-0.00".
pub fn format_display(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    match formatted.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => formatted,
    }
}

/// Convert a parsed value between two units of a category
///
/// Unit labels are matched case-insensitively; the canonical labels are
/// returned alongside the result. A result that overflows to infinity is
/// rejected as invalid input.
pub fn convert_value(
    category: Category,
    from_unit: &str,
    to_unit: &str,
    value: f64,
) -> Result<(f64, &'static str, &'static str), ConversionError> {
    let unsupported = || ConversionError::unsupported(category.as_str(), from_unit, to_unit);

    let from = category.unit(from_unit).ok_or_else(unsupported)?;
    let to = category.unit(to_unit).ok_or_else(unsupported)?;

    if category == Category::Temperature {
        let from_scale = TemperatureScale::from_label(from).ok_or_else(unsupported)?;
        let to_scale = TemperatureScale::from_label(to).ok_or_else(unsupported)?;
        return finite(convert_temperature(value, from_scale, to_scale), value)
            .map(|result| (result, from, to));
    }

    if from == to {
        return finite(value, value).map(|result| (result, from, to));
    }

    let factor = ConversionTable::standard()
        .factor(category, from, to)
        .ok_or_else(unsupported)?;

    finite(value * factor, value).map(|result| (result, from, to))
}

fn finite(result: f64, input: f64) -> Result<f64, ConversionError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ConversionError::InvalidInput {
            raw: input.to_string(),
        })
    }
}

/// Convert raw user input
///
/// Invalid numeric input is reported before the unit pair is checked.
pub fn convert(
    category: &str,
    from_unit: &str,
    to_unit: &str,
    raw_value: &str,
) -> Result<Conversion, ConversionError> {
    let input_value = parse_value(raw_value)?;

    let category_kind = Category::from_str(category)
        .ok_or_else(|| ConversionError::unsupported(category, from_unit, to_unit))?;

    let (value, from, to) = convert_value(category_kind, from_unit, to_unit, input_value)
        .map_err(|e| match e {
            ConversionError::InvalidInput { .. } => ConversionError::InvalidInput {
                raw: raw_value.to_string(),
            },
            other => other,
        })?;

    let input = raw_value.trim().to_string();
    let display_text = format_display(value);
    let sentence = format!("{} {} is equal to {} {}", input, from, display_text, to);

    tracing::debug!(category = %category_kind, from, to, input = %input, result = %display_text, "converted");

    Ok(Conversion {
        category: category_kind,
        from_unit: from,
        to_unit: to,
        input,
        input_value,
        value,
        display: display_text,
        sentence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::units::FACTORS;

    fn display(category: &str, from: &str, to: &str, raw: &str) -> String {
        convert(category, from, to, raw).unwrap().display
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(display("length", "meters", "feet", "10"), "32.81");
        assert_eq!(display("temperature", "Celsius", "Fahrenheit", "100"), "212.00");
        assert_eq!(display("temperature", "Kelvin", "Celsius", "0"), "-273.15");
        assert_eq!(display("weight", "kilograms", "pounds", "5"), "11.02");
        assert_eq!(display("volume", "liters", "gallons", "1"), "0.26");
    }

    #[test]
    fn test_sentence() {
        let c = convert("length", "meters", "feet", " 10 ").unwrap();
        assert_eq!(c.sentence, "10 meters is equal to 32.81 feet");
        assert_eq!(c.input, "10");
        assert_eq!(c.input_value, 10.0);
        assert!((c.value - 32.8084).abs() < 1e-9);
    }

    #[test]
    fn test_every_tabulated_factor() {
        for e in FACTORS {
            let c = convert(e.category.as_str(), e.from, e.to, "1").unwrap();
            assert!((c.value - e.factor).abs() < 1e-12, "{:?}", e);
            assert_eq!(c.display, format_display(e.factor));
        }
    }

    #[test]
    fn test_identity_for_every_unit() {
        for category in Category::ALL {
            for unit in category.units() {
                let c = convert(category.as_str(), unit, unit, "42.125").unwrap();
                assert_eq!(c.value, 42.125, "{} {}", category, unit);
            }
        }
    }

    #[test]
    fn test_temperature_round_trip() {
        for raw in ["-40", "0", "37", "98.6", "-273.15", "5000.123"] {
            let there = convert("temperature", "Celsius", "Fahrenheit", raw).unwrap();
            let back = convert("temperature", "Fahrenheit", "Celsius", &there.value.to_string()).unwrap();
            assert!((back.value - there.input_value).abs() < 0.01, "{}", raw);
        }
    }

    #[test]
    fn test_invalid_input() {
        for raw in ["abc", "", "   ", "12abc", "NaN", "inf", "-infinity", "1,5"] {
            let err = convert("length", "meters", "feet", raw).unwrap_err();
            assert_eq!(err.reason(), "invalid_input", "{:?}", raw);
        }
    }

    #[test]
    fn test_invalid_input_wins_over_unsupported_pair() {
        let err = convert("length", "inches", "yards", "abc").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));
    }

    #[test]
    fn test_unsupported_pairs() {
        let err = convert("length", "inches", "yards", "5").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnsupportedConversion {
                category: "length".into(),
                from: "inches".into(),
                to: "yards".into(),
            }
        );
        assert_eq!(err.reason(), "unsupported_pair");

        // Reverse directions are not derived
        assert!(convert("weight", "pounds", "kilograms", "1").is_err());
        assert!(convert("time", "minutes", "seconds", "1").is_err());
    }

    #[test]
    fn test_unknown_category_or_unit() {
        let err = convert("speed", "mph", "kph", "10").unwrap_err();
        assert_eq!(err.reason(), "unsupported_pair");

        // Unit from another category
        assert!(convert("weight", "meters", "feet", "1").is_err());
        // Unknown unit is not an identity even when both sides match
        assert!(convert("length", "parsecs", "parsecs", "1").is_err());
    }

    #[test]
    fn test_units_match_case_insensitively() {
        let c = convert("Temperature", "celsius", "KELVIN", "0").unwrap();
        assert_eq!(c.from_unit, "Celsius");
        assert_eq!(c.to_unit, "Kelvin");
        assert_eq!(c.display, "273.15");
    }

    #[test]
    fn test_overflowing_result_is_rejected() {
        let err = convert("volume", "liters", "milliliters", "1e306").unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidInput {
                raw: "1e306".to_string()
            }
        );

        let err = convert("temperature", "Celsius", "Fahrenheit", "1.7e308").unwrap_err();
        assert_eq!(err.reason(), "invalid_input");

        let err = convert_value(Category::Volume, "liters", "milliliters", f64::MAX).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));

        // Large but representable results still convert
        let c = convert("volume", "liters", "milliliters", "1e300").unwrap();
        assert!(c.value.is_finite());
        assert!(!c.display.contains("inf"));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(1.0), "1.00");
        assert_eq!(format_display(0.000001), "0.00");
        assert_eq!(format_display(-0.001), "0.00");
        assert_eq!(format_display(-0.0), "0.00");
        assert_eq!(format_display(-1.5), "-1.50");
        assert_eq!(format_display(1.0e21), "1000000000000000000000.00");
    }

    #[test]
    fn test_negative_and_exponent_inputs() {
        assert_eq!(display("length", "feet", "inches", "-2"), "-24.00");
        assert_eq!(display("volume", "liters", "milliliters", "1e-3"), "1.00");
    }
}
