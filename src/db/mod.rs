//! Database connection provider.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig (url, pool size, TLS mode)
//!     → tls.rs (NoTls | rustls without verification | rustls with CA roots)
//!     → pool.rs (deadpool-postgres pool, lazy connections)
//!     → migrations.rs (CREATE TABLE IF NOT EXISTS, optional)
//!     → shared Pool handed to the booking store
//! ```
//!
//! # Design Decisions
//! - Pool is built once at startup and injected, never global
//! - Checkout waits are bounded by `wait_timeout_secs`
//! - A checked-out connection returns to the pool when dropped

pub mod migrations;
pub mod pool;
pub mod tls;

use std::path::PathBuf;

use thiserror::Error;

pub use pool::connect;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to create connection pool: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("failed to read CA bundle {}: {source}", .path.display())]
    CaBundle {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("connection checkout failed: {0}")]
    Checkout(#[from] deadpool_postgres::PoolError),

    #[error("schema setup failed: {0}")]
    Migration(#[from] tokio_postgres::Error),
}
