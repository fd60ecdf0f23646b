use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Upstream base URL used when `MEMEGEN_API_BASE` is not provided.
pub const DEFAULT_API_BASE: &str = "https://api.memegen.link";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable {key}: {reason}")]
    InvalidValue {
        /// Name of the offending variable.
        key: String,
        /// Parser message explaining the rejection.
        reason: String,
    },
}

/// Runtime configuration for the memegen MCP server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the memegen API, shared by template lookups and generated image links.
    pub api_base_url: String,
    /// Optional path that receives a copy of the log output.
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match load_env_optional("MEMEGEN_API_BASE") {
            Some(value) => validate_base_url("MEMEGEN_API_BASE", &value)?,
            None => DEFAULT_API_BASE.to_string(),
        };

        Ok(Self {
            api_base_url,
            log_file: load_env_optional("MEMEGEN_MCP_LOG_FILE"),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn validate_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let parsed = url::Url::parse(trimmed).map_err(|err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
///
/// A `.env` file in the working directory is honored when present. Calling this more than once
/// keeps the first configuration.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}
