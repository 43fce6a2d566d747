//! MeasureMinds Tools module
//!
//! Tool implementations, independent of the MCP transport.

pub mod converter;
pub mod status;
