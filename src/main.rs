//! Booking System API
//!
//! A small CRUD service for salon bookings built with Tokio, Axum and
//! deadpool-postgres.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ ┌──────────────────────────────────────────────┐
//!                     │ http::server (trace, request id, timeout,    │
//!                     │               CORS preflight, panic capture) │
//!                     └──────────────────────┬───────────────────────┘
//!                                            ▼
//!                     ┌──────────────────────────────────────────────┐
//!                     │ routing (route table → one operation)        │
//!                     └──────────────────────┬───────────────────────┘
//!                                            ▼
//!                     ┌──────────────────────────────────────────────┐
//!                     │ bookings (validate → one statement → JSON)   │
//!                     └──────────────────────┬───────────────────────┘
//!                                            ▼
//!                     ┌──────────────────────────────────────────────┐
//!                     │ db (deadpool-postgres pool, TLS)             │──▶ Postgres
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use booking_api::config::load_config;
use booking_api::lifecycle::startup;
use booking_api::observability::logging;

#[derive(Parser)]
#[command(name = "booking-api")]
#[command(about = "CRUD HTTP API for salon bookings", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults and environment are used without one.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("booking-api: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);

    tracing::info!("booking-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.database.max_connections,
        tls = ?config.database.tls_mode(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Startup failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
