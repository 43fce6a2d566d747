//! One-shot unit conversion from the command line
//! Usage: measureminds-convert <category> <from_unit> <to_unit> <value>
//!
//! Multi-word units must be quoted: measureminds-convert area "square meters" acres 5000

use std::process::ExitCode;

use measureminds::conversion::{convert, Category};

/// Exit code for a conversion that produced no value
const EXIT_CONVERSION_FAILED: u8 = 1;
/// Exit code for wrong arguments
const EXIT_USAGE: u8 = 2;

fn usage() -> String {
    let categories: Vec<String> = Category::ALL
        .iter()
        .map(|c| format!("  {:<12} {}", c.as_str(), c.units().join(", ")))
        .collect();
    format!(
        "Usage: measureminds-convert <category> <from_unit> <to_unit> <value>\n\nCategories:\n{}",
        categories.join("\n")
    )
}

/// Run one conversion; `Ok` goes to stdout, `Err` carries the exit code and stderr text
fn run(args: &[String]) -> Result<String, (u8, String)> {
    let [category, from_unit, to_unit, value] = args else {
        return Err((EXIT_USAGE, usage()));
    };

    convert(category, from_unit, to_unit, value)
        .map(|conversion| conversion.sentence)
        .map_err(|e| (EXIT_CONVERSION_FAILED, format!("{} ({})", e, e.reason())))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(sentence) => {
            println!("{}", sentence);
            ExitCode::SUCCESS
        }
        Err((code, message)) => {
            eprintln!("{}", message);
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_success_prints_sentence() {
        let out = run(&args(&["area", "square meters", "hectares", "5000"])).unwrap();
        assert_eq!(out, "5000 square meters is equal to 0.50 hectares");
    }

    #[test]
    fn test_invalid_input_exits_with_one() {
        let (code, message) = run(&args(&["length", "meters", "feet", "abc"])).unwrap_err();
        assert_eq!(code, 1);
        assert_eq!(message, "Please enter a valid number (invalid_input)");
    }

    #[test]
    fn test_unsupported_pair_exits_with_one() {
        let (code, message) = run(&args(&["length", "inches", "yards", "5"])).unwrap_err();
        assert_eq!(code, 1);
        assert!(message.ends_with("(unsupported_pair)"));
    }

    #[test]
    fn test_wrong_argument_count_exits_with_two() {
        for bad in [args(&[]), args(&["length", "meters", "feet"]), args(&["a", "b", "c", "d", "e"])] {
            let (code, message) = run(&bad).unwrap_err();
            assert_eq!(code, 2);
            assert!(message.starts_with("Usage: measureminds-convert"));
            assert!(message.contains("temperature"));
        }
    }
}
