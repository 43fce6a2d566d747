//! OpenAI chat completions client
//!
//! Sends a single user prompt and returns the first choice's text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ComparisonError, ComparisonProvider};
use crate::config::ComparisonConfig;

/// Upper bound on generated tokens; the prompt asks for one short sentence
pub const MAX_TOKENS: u32 = 50;

// ============================================================================
// OpenAI API types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Comparison provider backed by an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Build a client from configuration
    ///
    /// Fails with `NotConfigured` when no API key is set.
    pub fn new(config: &ComparisonConfig) -> Result<Self, ComparisonError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ComparisonError::NotConfigured)?;

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ComparisonProvider for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn compare(&self, prompt: &str) -> Result<String, ComparisonError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.model, "requesting size comparison");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        extract_content(&body)
    }
}

fn api_error(status: u16, body: &str) -> ComparisonError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    };
    ComparisonError::Api { status, message }
}

/// Pull the first choice's trimmed text out of a response body
fn extract_content(body: &str) -> Result<String, ComparisonError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ComparisonError::InvalidResponse(format!("malformed JSON: {}", e)))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ComparisonError::InvalidResponse("no choices in response".to_string()))?
        .message
        .content
        .unwrap_or_default();

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ComparisonError::InvalidResponse(
            "empty message content".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}
