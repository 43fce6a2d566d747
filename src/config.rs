//! Runtime configuration
//!
//! Read once at startup from environment variables.

use std::time::Duration;

use thiserror::Error;

pub const ENV_API_KEY: &str = "MEASUREMINDS_OPENAI_API_KEY";
/// Fallback key variable used by most OpenAI tooling
pub const ENV_API_KEY_FALLBACK: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "MEASUREMINDS_OPENAI_MODEL";
pub const ENV_BASE_URL: &str = "MEASUREMINDS_OPENAI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MEASUREMINDS_COMPARISON_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Settings for the size comparison service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// None disables comparisons
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ComparisonConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub comparison: ComparisonConfig,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK));
        let model = get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get(ENV_BASE_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match get(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            comparison: ComparisonConfig {
                api_key,
                model,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
