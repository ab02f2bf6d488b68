//! Schema bootstrap.

use deadpool_postgres::Pool;

use crate::db::DbError;

/// Idempotent DDL for the `bookings` table.
pub const SCHEMA: &str = include_str!("../../migrations/0001_create_bookings.sql");

pub async fn run(pool: &Pool) -> Result<(), DbError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    tracing::info!("Bookings schema ready");
    Ok(())
}
