//! MeasureMinds
//!
//! An MCP server for unit conversion with real-world size comparisons.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use measureminds::build_info;
use measureminds::comparison::{ComparisonProvider, OpenAiClient};
use measureminds::config::{Config, ENV_API_KEY};
use measureminds::mcp::MeasureMindsService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("measureminds=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;

    let comparison: Option<Arc<dyn ComparisonProvider>> = if config.comparison.is_enabled() {
        let client: Arc<dyn ComparisonProvider> = Arc::new(OpenAiClient::new(&config.comparison)?);
        tracing::info!(
            model = %config.comparison.model,
            base_url = %config.comparison.base_url,
            "size comparisons enabled"
        );
        Some(client)
    } else {
        tracing::warn!("{} not set; size comparisons disabled", ENV_API_KEY);
        None
    };

    let service = MeasureMindsService::new(comparison);

    // Create stdio transport
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
