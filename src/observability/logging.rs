//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, with `RUST_LOG` taking precedence
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Per-request spans come from tower-http's TraceLayer

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "booking_api={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(config).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
