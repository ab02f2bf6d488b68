//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0, addresses parse)
//! - Check that TLS settings are complete
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::{ApiConfig, TlsMode};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("database.url must be a postgres:// or postgresql:// connection string")]
    DatabaseUrl,

    #[error("database.max_connections must be greater than zero")]
    PoolSize,

    #[error("database.tls = \"verify\" requires database.ca_cert_path")]
    MissingCaCert,

    #[error("cors.allowed_origins contains an invalid origin '{0}'")]
    CorsOrigin(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let url = config.database.url.trim();
    if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
        errors.push(ValidationError::DatabaseUrl);
    }

    if config.database.max_connections == 0 {
        errors.push(ValidationError::PoolSize);
    }

    if config.database.tls_mode() == TlsMode::Verify && config.database.ca_cert_path.is_none() {
        errors.push(ValidationError::MissingCaCert);
    }

    for origin in &config.cors.allowed_origins {
        if origin.trim().is_empty() || HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::CorsOrigin(origin.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ApiConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = ApiConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.database.url = "mysql://localhost/db".into();
        config.database.max_connections = 0;
        config.database.tls = Some(TlsMode::Verify);
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::DatabaseUrl,
                ValidationError::PoolSize,
                ValidationError::MissingCaCert,
                ValidationError::RequestTimeout,
            ]
        );
    }

    #[test]
    fn metrics_address_only_checked_when_enabled() {
        let mut config = ApiConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nowhere".into())])
        );
    }

    #[test]
    fn rejects_blank_cors_origin() {
        let mut config = ApiConfig::default();
        config.cors.allowed_origins.push("  ".into());
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::CorsOrigin("  ".into())])
        );
    }
}
