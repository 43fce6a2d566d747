//! Conversion and comparison MCP tools

use serde::Serialize;

use crate::comparison::{comparison_prompt, ComparisonError, ComparisonProvider};
use crate::config::ENV_API_KEY;
use crate::conversion::{convert, Category, Conversion, ConversionTable};

/// Shown to the user when the comparison service fails
pub const COMPARISON_FAILED_MESSAGE: &str = "An error occurred. Please try again.";
/// Attached to every generated comparison
pub const AI_DISCLAIMER: &str = "AI can make mistakes.";

/// Response for convert_units
///
/// Serializes as `{"ok": true, ...conversion}` or
/// `{"ok": false, "reason": ..., "message": ...}`.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub conversion: Option<Conversion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for compare_measurement
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    #[serde(flatten)]
    pub result: ConvertResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<&'static str>,
}

/// A tabulated factor, for listing
#[derive(Debug, Serialize)]
pub struct PairInfo {
    pub from: &'static str,
    pub to: &'static str,
    pub factor: f64,
}

/// One category with its units and supported pairs
#[derive(Debug, Serialize)]
pub struct CategoryUnits {
    pub category: Category,
    pub display_name: &'static str,
    pub units: Vec<&'static str>,
    pub default_from: &'static str,
    pub default_to: &'static str,
    /// Temperature converts between every pair by formula
    pub formula_based: bool,
    pub tabulated_pairs: Vec<PairInfo>,
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub categories: Vec<CategoryUnits>,
}

// ============================================================================
// Conversion Tools
// ============================================================================

/// Convert a raw value; failures are reported in the response, not as errors
pub fn convert_units(category: &str, from_unit: &str, to_unit: &str, value: &str) -> ConvertResponse {
    match convert(category, from_unit, to_unit, value) {
        Ok(conversion) => ConvertResponse {
            ok: true,
            conversion: Some(conversion),
            reason: None,
            message: None,
        },
        Err(e) => {
            tracing::info!(reason = e.reason(), "conversion rejected: {}", e);
            ConvertResponse {
                ok: false,
                conversion: None,
                reason: Some(e.reason()),
                message: Some(e.to_string()),
            }
        }
    }
}

/// List categories, their units and tabulated pairs
pub fn list_units(category: Option<&str>) -> Result<ListUnitsResponse, String> {
    let selected: Vec<Category> = match category {
        Some(name) => vec![Category::from_str(name).ok_or_else(|| {
            format!(
                "Unknown category '{}'. Expected one of: {}",
                name,
                Category::ALL.map(|c| c.as_str()).join(", ")
            )
        })?],
        None => Category::ALL.to_vec(),
    };

    let table = ConversionTable::standard();
    let categories = selected
        .into_iter()
        .map(|category| {
            let (default_from, default_to) = category.default_pair();
            let tabulated_pairs = table
                .pairs(category)
                .into_iter()
                .filter_map(|(from, to)| {
                    table
                        .factor(category, from, to)
                        .map(|factor| PairInfo { from, to, factor })
                })
                .collect();

            CategoryUnits {
                category,
                display_name: category.display_name(),
                units: category.units().to_vec(),
                default_from,
                default_to,
                formula_based: category == Category::Temperature,
                tabulated_pairs,
            }
        })
        .collect();

    Ok(ListUnitsResponse { categories })
}

// ============================================================================
// Comparison Tool
// ============================================================================

/// Convert, then ask the provider for a real-world comparison
///
/// The provider is only called after a successful conversion. Its failure
/// is reported alongside the conversion, which is always kept.
pub async fn compare_measurement(
    provider: Option<&dyn ComparisonProvider>,
    category: &str,
    from_unit: &str,
    to_unit: &str,
    value: &str,
) -> CompareResponse {
    let result = convert_units(category, from_unit, to_unit, value);

    let mut response = CompareResponse {
        result,
        comparison: None,
        comparison_error: None,
        disclaimer: None,
    };

    let Some(conversion) = response.result.conversion.as_ref() else {
        return response;
    };

    let Some(provider) = provider else {
        response.comparison_error = Some(not_configured_message());
        return response;
    };

    let prompt = comparison_prompt(conversion);
    match provider.compare(&prompt).await {
        Ok(text) => {
            response.comparison = Some(text);
            response.disclaimer = Some(AI_DISCLAIMER);
        }
        Err(ComparisonError::NotConfigured) => {
            response.comparison_error = Some(not_configured_message());
        }
        Err(e) => {
            tracing::warn!(model = provider.model(), "size comparison failed: {}", e);
            response.comparison_error = Some(COMPARISON_FAILED_MESSAGE.to_string());
        }
    }

    response
}

fn not_configured_message() -> String {
    format!(
        "Size comparisons are not configured. Set {} to enable them.",
        ENV_API_KEY
    )
}
