//! Unit conversion engine
//!
//! Table-driven multiplicative conversions plus explicit temperature formulae.

pub mod converter;
pub mod temperature;
pub mod units;

pub use converter::{convert, convert_value, format_display, parse_value, Conversion, ConversionError};
pub use temperature::{convert_temperature, TemperatureScale};
pub use units::{Category, ConversionTable, FactorEntry, FACTORS};
