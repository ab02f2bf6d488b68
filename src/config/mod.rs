//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: DATABASE_URL, DATABASE_TLS, APP_ENV, BIND_ADDRESS)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiConfig, CorsConfig, DatabaseConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig,
    TlsMode,
};
