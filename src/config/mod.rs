//! Runtime configuration, read from environment variables with development
//! defaults for everything except the model credential.

use std::env;
use thiserror::Error;

use crate::analysis::llm::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_BASE_URL: &str = "ANTHROPIC_BASE_URL";
pub const ENV_MODEL: &str = "ANTHROPIC_MODEL";
pub const ENV_MAX_TOKENS: &str = "ANTHROPIC_MAX_TOKENS";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
    bind_addr: String,
}

impl Config {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.and_then(non_blank),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// A missing or blank API key is not an error here; the server still starts
    /// and answers analysis requests with "service unavailable".
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(env::var(ENV_API_KEY).ok());

        if let Some(base_url) = env::var(ENV_BASE_URL).ok().and_then(non_blank) {
            url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidValue {
                field: ENV_BASE_URL,
                reason: e.to_string(),
            })?;
            config.base_url = base_url;
        }
        if let Some(model) = env::var(ENV_MODEL).ok().and_then(non_blank) {
            config.model = model;
        }
        if let Some(max_tokens) = env::var(ENV_MAX_TOKENS).ok().and_then(non_blank) {
            config.max_tokens = match max_tokens.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_MAX_TOKENS,
                        reason: format!("expected a positive integer, got {max_tokens:?}"),
                    });
                }
            };
        }
        if let Some(bind_addr) = env::var(ENV_BIND_ADDR).ok().and_then(non_blank) {
            config.bind_addr = bind_addr;
        }

        Ok(config)
    }

    /// Model credential, `None` when unset or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
    pub fn model(&self) -> &str {
        &self.model
    }
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
}

// Hand-written so the credential never lands in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
