//! MeasureMinds Library
//!
//! Unit conversion engine, size comparison client and MCP tools.

pub mod build_info;
pub mod comparison;
pub mod config;
pub mod conversion;
pub mod mcp;
pub mod tools;
