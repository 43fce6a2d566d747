//! Prompt text for size comparisons

use crate::conversion::Conversion;

/// Prompt asking for one real-world example of the converted quantity
pub fn comparison_prompt(conversion: &Conversion) -> String {
    format!(
        "Give me an example of something that is approximately {} {} in {}. Respond in one short sentence.",
        conversion.display,
        conversion.to_unit,
        conversion.category.as_str()
    )
}
