//! Real-world size comparisons
//!
//! Asks a text-generation service to describe a converted quantity.
//! Failures here never affect the conversion result.

mod client;
mod prompt;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{OpenAiClient, MAX_TOKENS};
pub use prompt::comparison_prompt;

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("Size comparisons are not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A service that turns a prompt into one short descriptive sentence
#[async_trait]
pub trait ComparisonProvider: Send + Sync {
    /// Model identifier, reported by the status tool
    fn model(&self) -> &str;

    async fn compare(&self, prompt: &str) -> Result<String, ComparisonError>;
}
