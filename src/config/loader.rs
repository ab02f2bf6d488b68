//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ApiConfig, TlsMode};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ApiConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ApiConfig::default(),
    };

    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment settings onto a parsed config.
///
/// `lookup` returns the value of a variable, or `None` when unset.
pub fn apply_env_overrides<F>(mut config: ApiConfig, lookup: F) -> Result<ApiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        config.database.url = url;
    }

    if let Some(addr) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }

    if let Some(mode) = lookup("DATABASE_TLS") {
        let mode = mode
            .parse::<TlsMode>()
            .map_err(|reason| ConfigError::Env {
                name: "DATABASE_TLS",
                reason,
            })?;
        config.database.tls = Some(mode);
    }

    if config.database.tls.is_none()
        && lookup("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production"))
    {
        config.database.tls = Some(TlsMode::Require);
    }

    Ok(config)
}
