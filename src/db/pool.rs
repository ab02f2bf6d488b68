//! Connection pool construction.

use std::path::Path;
use std::time::Duration;

use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

use crate::config::{DatabaseConfig, TlsMode};
use crate::db::{tls, DbError};

/// Build the pool. No connection is opened until the first checkout.
pub fn connect(config: &DatabaseConfig) -> Result<Pool, DbError> {
    let pg_config = pool_config(config);

    let pool = match config.tls_mode() {
        TlsMode::Disable => pg_config.create_pool(Some(Runtime::Tokio1), NoTls)?,
        mode => {
            let connector = tls::connector(mode, config.ca_cert_path.as_deref().map(Path::new))?;
            pg_config.create_pool(Some(Runtime::Tokio1), connector)?
        }
    };

    tracing::info!(
        max_connections = config.max_connections,
        tls = ?config.tls_mode(),
        "Database pool created"
    );
    Ok(pool)
}

fn pool_config(config: &DatabaseConfig) -> Config {
    let timeout = Some(Duration::from_secs(config.wait_timeout_secs));

    let mut pool = PoolConfig::new(config.max_connections);
    pool.timeouts.wait = timeout;
    pool.timeouts.create = timeout;
    pool.timeouts.recycle = timeout;

    let mut pg_config = Config::new();
    pg_config.url = Some(config.url.clone());
    pg_config.pool = Some(pool);
    pg_config.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    pg_config
}
