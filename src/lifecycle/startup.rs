//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Build the connection pool and the booking store
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::bookings::{BookingStore, PgBookingStore};
use crate::config::{ApiConfig, ConfigError};
use crate::db::{self, DbError};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Create the pool, run migrations if configured, and wrap it in a store.
pub async fn build_store(config: &ApiConfig) -> Result<Arc<dyn BookingStore>, StartupError> {
    let pool = db::connect(&config.database)?;
    if config.database.run_migrations {
        db::migrations::run(&pool).await?;
    }
    Ok(Arc::new(PgBookingStore::new(pool)))
}

pub async fn bind(config: &ApiConfig) -> Result<TcpListener, StartupError> {
    let address = config.listener.bind_address.clone();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Start every subsystem and serve until a termination signal arrives.
pub async fn run(config: ApiConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = build_store(&config).await?;
    let listener = bind(&config).await?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    HttpServer::new(config, store)
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
