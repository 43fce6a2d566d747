//! MeasureMinds Status Tool
//!
//! Provides runtime status information about the MeasureMinds service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::conversion::{Category, FACTORS};

/// Usage guide for AI assistants
pub const CONVERTER_INSTRUCTIONS: &str = r#"
# MeasureMinds Conversion Instructions

MeasureMinds converts a value between two units of the same category and can
describe the result with a real-world size comparison.

## Categories and Units

| Category | Units |
|----------|-------|
| length | meters, feet, inches, centimeters, kilometers, miles, yards |
| temperature | Celsius, Fahrenheit, Kelvin |
| area | square meters, square feet, acres, hectares, square kilometers |
| volume | liters, gallons, cubic meters, cubic feet, milliliters |
| weight | kilograms, pounds, ounces, tons, grams |
| time | seconds, minutes, hours, days, weeks, months, years |

Unit names are matched ignoring case. Call `list_units` for the exact list of
supported pairs.

## Supported Pairs

Only directly tabulated pairs convert. MeasureMinds does NOT chain
conversions or invert factors.

- **length:** from meters or feet to any other length unit
- **area:** from square meters
- **volume:** from liters
- **weight:** from kilograms
- **time:** from seconds
- **temperature:** any pair (formula based)
- Any unit to itself returns the value unchanged

A pair such as inches → yards returns `"reason": "unsupported_pair"`. To get
there, convert from a base unit yourself (e.g. ask for meters → yards).

## Tools

| Task | Tool |
|------|------|
| Convert a value | `convert_units` |
| Convert and describe the size | `compare_measurement` |
| See units and supported pairs | `list_units` |
| Check service health | `measureminds_status` |

### Values

Pass `value` as text, exactly as the user typed it ("10", "-3.5", "2e3").
Text that is not a finite number returns `"reason": "invalid_input"`; ask the
user for a valid number.

### Results

Results are rounded to two decimals in `display`; the unrounded number is in
`value`. Present the `sentence` field to the user:

```
10 meters is equal to 32.81 feet
```

### Comparisons

`compare_measurement` returns the conversion plus a one-sentence
`comparison`. If `comparison_error` is set, still show the converted value
and offer to retry. Always pass along the `disclaimer`: AI can make mistakes.
"#;

/// Runtime status of the MeasureMinds service
#[derive(Debug, Clone, Serialize)]
pub struct MeasureMindsStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub category_count: usize,
    pub tabulated_pairs: usize,
    pub comparisons_enabled: bool,
    pub comparison_model: Option<String>,

    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    comparison_model: Option<String>,
}

impl StatusTracker {
    pub fn new(comparison_model: Option<String>) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            comparison_model,
        }
    }

    pub fn get_status(&self) -> MeasureMindsStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MeasureMindsStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            category_count: Category::ALL.len(),
            tabulated_pairs: FACTORS.len(),
            comparisons_enabled: self.comparison_model.is_some(),
            comparison_model: self.comparison_model.clone(),
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
