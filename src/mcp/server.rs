//! MeasureMinds MCP Server Implementation
//!
//! Exposes the conversion and comparison tools over MCP.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::comparison::ComparisonProvider;
use crate::tools::converter;
use crate::tools::status::StatusTracker;

/// MeasureMinds MCP Service
#[derive(Clone)]
pub struct MeasureMindsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    comparison: Option<Arc<dyn ComparisonProvider>>,
    tool_router: ToolRouter<MeasureMindsService>,
}

impl MeasureMindsService {
    /// Create the service; `None` disables size comparisons
    pub fn new(comparison: Option<Arc<dyn ComparisonProvider>>) -> Self {
        let model = comparison.as_ref().map(|p| p.model().to_string());
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(model))),
            comparison,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    /// Category: length, temperature, area, volume, weight, or time
    pub category: String,
    /// Source unit (e.g., "meters", "Celsius", "square meters")
    pub from_unit: String,
    /// Target unit (e.g., "feet", "Fahrenheit", "acres")
    pub to_unit: String,
    /// Value to convert, as text (e.g., "10", "-3.5")
    pub value: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUnitsParams {
    /// Only list this category (optional)
    pub category: Option<String>,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MeasureMindsService {
    // --- Status ---

    #[tool(description = "Get the current status of the MeasureMinds service including build info, comparison settings, and process information")]
    async fn measureminds_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for converting units and requesting size comparisons. Call this when unsure which unit pairs are supported.")]
    fn converter_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CONVERTER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CONVERTER_INSTRUCTIONS)]))
    }

    // --- Conversion ---

    #[tool(description = "List measurement categories with their units, default unit pair, and the directly supported conversion pairs")]
    fn list_units(&self, Parameters(p): Parameters<ListUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = converter::list_units(p.category.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a value between two units of the same category. Returns ok=false with reason invalid_input or unsupported_pair when the conversion cannot be done.")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = converter::convert_units(&p.category, &p.from_unit, &p.to_unit, &p.value);
        to_json(&result)
    }

    #[tool(description = "Convert a value and get a one-sentence real-world size comparison of the result from an AI model. The conversion is returned even if the comparison fails.")]
    async fn compare_measurement(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = converter::compare_measurement(
            self.comparison.as_deref(),
            &p.category,
            &p.from_unit,
            &p.to_unit,
            &p.value,
        )
        .await;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MeasureMindsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "measureminds".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("MeasureMinds".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MeasureMinds - Unit conversion with real-world size comparisons. \
                 Call converter_instructions first if unsure which pairs are supported. \
                 Conversion: convert_units, list_units. \
                 Comparison: compare_measurement (conversion plus AI size comparison). \
                 Status: measureminds_status."
                    .into(),
            ),
        }
    }
}
