//! Categories, unit labels and the conversion factor table
//!
//! The factor table is sparse: only pairs listed in [`FACTORS`] resolve.
//! Reverse and third-unit pairs are absent.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Category of measurement. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Temperature,
    Area,
    Volume,
    Weight,
    Time,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Temperature,
        Category::Area,
        Category::Volume,
        Category::Weight,
        Category::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Temperature => "temperature",
            Category::Area => "area",
            Category::Volume => "volume",
            Category::Weight => "weight",
            Category::Time => "time",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "length" => Some(Category::Length),
            "temperature" => Some(Category::Temperature),
            "area" => Some(Category::Area),
            "volume" => Some(Category::Volume),
            "weight" => Some(Category::Weight),
            "time" => Some(Category::Time),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Temperature => "Temperature",
            Category::Area => "Area",
            Category::Volume => "Volume",
            Category::Weight => "Weight",
            Category::Time => "Time",
        }
    }

    /// Unit labels of this category, in display order
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            Category::Length => LENGTH_UNITS,
            Category::Temperature => TEMPERATURE_UNITS,
            Category::Area => AREA_UNITS,
            Category::Volume => VOLUME_UNITS,
            Category::Weight => WEIGHT_UNITS,
            Category::Time => TIME_UNITS,
        }
    }

    /// Preselected (from, to) pair: the first two units of the list
    pub fn default_pair(&self) -> (&'static str, &'static str) {
        let units = self.units();
        (units[0], units[1])
    }

    /// Resolve a unit label to its canonical spelling within this category
    ///
    /// Matching ignores surrounding whitespace and ASCII case.
    pub fn unit(&self, label: &str) -> Option<&'static str> {
        let trimmed = label.trim();
        self.units()
            .iter()
            .copied()
            .find(|unit| unit.eq_ignore_ascii_case(trimmed))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Unit Lists
// ============================================================================

const LENGTH_UNITS: &[&str] = &[
    "meters",
    "feet",
    "inches",
    "centimeters",
    "kilometers",
    "miles",
    "yards",
];
const TEMPERATURE_UNITS: &[&str] = &["Celsius", "Fahrenheit", "Kelvin"];
const AREA_UNITS: &[&str] = &[
    "square meters",
    "square feet",
    "acres",
    "hectares",
    "square kilometers",
];
const VOLUME_UNITS: &[&str] = &[
    "liters",
    "gallons",
    "cubic meters",
    "cubic feet",
    "milliliters",
];
const WEIGHT_UNITS: &[&str] = &["kilograms", "pounds", "ounces", "tons", "grams"];
const TIME_UNITS: &[&str] = &[
    "seconds", "minutes", "hours", "days", "weeks", "months", "years",
];

// ============================================================================
// Conversion Factors
// ============================================================================

/// One tabulated multiplicative conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorEntry {
    pub category: Category,
    pub from: &'static str,
    pub to: &'static str,
    pub factor: f64,
}

const fn entry(category: Category, from: &'static str, to: &'static str, factor: f64) -> FactorEntry {
    FactorEntry {
        category,
        from,
        to,
        factor,
    }
}

/// Seconds per mean Gregorian month (365.2425 days / 12)
pub const SECONDS_PER_MONTH: f64 = 2_629_746.0;
/// Seconds per mean Gregorian year (365.2425 days)
pub const SECONDS_PER_YEAR: f64 = 31_556_952.0;

/// Every tabulated (category, from, to, factor) entry
pub const FACTORS: &[FactorEntry] = &[
    // Length from meters
    entry(Category::Length, "meters", "feet", 3.28084),
    entry(Category::Length, "meters", "inches", 39.3701),
    entry(Category::Length, "meters", "centimeters", 100.0),
    entry(Category::Length, "meters", "kilometers", 0.001),
    entry(Category::Length, "meters", "miles", 0.000621371),
    entry(Category::Length, "meters", "yards", 1.09361),
    // Length from feet
    entry(Category::Length, "feet", "meters", 0.3048),
    entry(Category::Length, "feet", "inches", 12.0),
    entry(Category::Length, "feet", "centimeters", 30.48),
    entry(Category::Length, "feet", "kilometers", 0.0003048),
    entry(Category::Length, "feet", "miles", 0.000189394),
    entry(Category::Length, "feet", "yards", 0.333333),
    // Area
    entry(Category::Area, "square meters", "square feet", 10.7639),
    entry(Category::Area, "square meters", "acres", 0.000247105),
    entry(Category::Area, "square meters", "hectares", 0.0001),
    entry(Category::Area, "square meters", "square kilometers", 0.000001),
    // Volume
    entry(Category::Volume, "liters", "gallons", 0.264172),
    entry(Category::Volume, "liters", "cubic meters", 0.001),
    entry(Category::Volume, "liters", "cubic feet", 0.0353147),
    entry(Category::Volume, "liters", "milliliters", 1000.0),
    // Weight
    entry(Category::Weight, "kilograms", "pounds", 2.20462),
    entry(Category::Weight, "kilograms", "ounces", 35.274),
    entry(Category::Weight, "kilograms", "tons", 0.001),
    entry(Category::Weight, "kilograms", "grams", 1000.0),
    // Time
    entry(Category::Time, "seconds", "minutes", 1.0 / 60.0),
    entry(Category::Time, "seconds", "hours", 1.0 / 3600.0),
    entry(Category::Time, "seconds", "days", 1.0 / 86_400.0),
    entry(Category::Time, "seconds", "weeks", 1.0 / 604_800.0),
    entry(Category::Time, "seconds", "months", 1.0 / SECONDS_PER_MONTH),
    entry(Category::Time, "seconds", "years", 1.0 / SECONDS_PER_YEAR),
];

// ============================================================================
// Lookup Table
// ============================================================================

type FactorMap = HashMap<&'static str, HashMap<&'static str, f64>>;

/// Read-only category -> from -> to -> factor lookup
#[derive(Debug)]
pub struct ConversionTable {
    categories: HashMap<Category, FactorMap>,
}

impl ConversionTable {
    /// Build a table from entries. Later duplicates replace earlier ones.
    pub fn from_entries(entries: &[FactorEntry]) -> Self {
        let mut categories: HashMap<Category, FactorMap> = HashMap::new();
        for e in entries {
            categories
                .entry(e.category)
                .or_default()
                .entry(e.from)
                .or_default()
                .insert(e.to, e.factor);
        }
        Self { categories }
    }

    /// The process-wide table, built on first use
    pub fn standard() -> &'static ConversionTable {
        static TABLE: OnceLock<ConversionTable> = OnceLock::new();
        TABLE.get_or_init(|| ConversionTable::from_entries(FACTORS))
    }

    /// Factor for a directly tabulated pair. Labels must be canonical.
    pub fn factor(&self, category: Category, from: &str, to: &str) -> Option<f64> {
        self.categories.get(&category)?.get(from)?.get(to).copied()
    }

    /// Tabulated (from, to) pairs of a category, sorted for stable output
    pub fn pairs(&self, category: Category) -> Vec<(&'static str, &'static str)> {
        let mut pairs: Vec<_> = self
            .categories
            .get(&category)
            .into_iter()
            .flat_map(|froms| {
                froms
                    .iter()
                    .flat_map(|(from, tos)| tos.keys().map(move |to| (*from, *to)))
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }
}
