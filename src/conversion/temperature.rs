//! Temperature scales and their affine conversions

/// Offset between Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.15;
/// Offset between Celsius and Fahrenheit
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Parse a canonical temperature unit label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Celsius" => Some(TemperatureScale::Celsius),
            "Fahrenheit" => Some(TemperatureScale::Fahrenheit),
            "Kelvin" => Some(TemperatureScale::Kelvin),
            _ => None,
        }
    }
}

/// Convert a temperature between scales
///
/// Each direction uses its own formula rather than routing through Celsius.
pub fn convert_temperature(value: f64, from: TemperatureScale, to: TemperatureScale) -> f64 {
    use TemperatureScale::*;

    match (from, to) {
        (Celsius, Fahrenheit) => value * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
        (Fahrenheit, Celsius) => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
        (Celsius, Kelvin) => value + KELVIN_OFFSET,
        (Kelvin, Celsius) => value - KELVIN_OFFSET,
        (Fahrenheit, Kelvin) => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0 + KELVIN_OFFSET,
        (Kelvin, Fahrenheit) => (value - KELVIN_OFFSET) * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
        (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,
    }
}
