//! Postgres-backed booking store.
//!
//! Each call checks out one pooled connection for exactly one statement.
//! The checked-out `Object` returns to the pool when it drops, so the
//! connection is released on success, on "no row", and on error alike.

use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::bookings::model::{Booking, BookingId, BookingInput};
use crate::bookings::store::{BookingStore, StoreError};

// Widens a SERIAL id and reads date, time and user_id back as text. Id parameters
// are cast to bigint so lookups also match an int4 id column.
const COLUMNS: &str = "id::bigint AS id, title, description, date::text AS date, \
                       \"time\"::text AS \"time\", phone_number, email, user_id::text AS user_id";

fn list_sql() -> String {
    format!(
        "SELECT {COLUMNS} FROM bookings \
         ORDER BY bookings.date DESC, bookings.\"time\" DESC, bookings.id ASC"
    )
}

fn insert_sql() -> String {
    format!(
        "INSERT INTO bookings (title, description, date, \"time\", phone_number, email, user_id) \
         VALUES ($1, $2, $3::text::date, $4::text::time, $5, $6, $7::text) RETURNING {COLUMNS}"
    )
}

fn select_one_sql() -> String {
    format!("SELECT {COLUMNS} FROM bookings WHERE id = $1::bigint")
}

fn update_sql() -> String {
    format!(
        "UPDATE bookings SET title = $1, description = $2, date = $3::text::date, \
         \"time\" = $4::text::time, phone_number = $5, email = $6, user_id = $7::text \
         WHERE id = $8::bigint RETURNING {COLUMNS}"
    )
}

fn delete_sql() -> String {
    format!("DELETE FROM bookings WHERE id = $1::bigint RETURNING {COLUMNS}")
}

#[derive(Clone)]
pub struct PgBookingStore {
    pool: Pool,
}

impl PgBookingStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl TryFrom<&Row> for Booking {
    type Error = StoreError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let decode = |e: tokio_postgres::Error| StoreError::Decode(e.to_string());
        Ok(Booking {
            id: row.try_get("id").map_err(decode)?,
            title: row.try_get("title").map_err(decode)?,
            description: row.try_get("description").map_err(decode)?,
            date: row.try_get("date").map_err(decode)?,
            time: row.try_get("time").map_err(decode)?,
            phone_number: row.try_get("phone_number").map_err(decode)?,
            email: row.try_get("email").map_err(decode)?,
            user_id: row.try_get("user_id").map_err(decode)?,
        })
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client.query(list_sql().as_str(), &[]).await?;
        rows.iter().map(Booking::try_from).collect()
    }

    async fn create(&self, input: BookingInput) -> Result<Booking, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                insert_sql().as_str(),
                &[
                    &input.title,
                    &input.description,
                    &input.date,
                    &input.time,
                    &input.phone_number,
                    &input.email,
                    &input.user_id,
                ],
            )
            .await?;
        Booking::try_from(&row)
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(select_one_sql().as_str(), &[&id]).await?;
        row.as_ref().map(Booking::try_from).transpose()
    }

    async fn update(
        &self,
        id: BookingId,
        input: BookingInput,
    ) -> Result<Option<Booking>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                update_sql().as_str(),
                &[
                    &input.title,
                    &input.description,
                    &input.date,
                    &input.time,
                    &input.phone_number,
                    &input.email,
                    &input.user_id,
                    &id,
                ],
            )
            .await?;
        row.as_ref().map(Booking::try_from).transpose()
    }

    async fn delete(&self, id: BookingId) -> Result<Option<Booking>, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(delete_sql().as_str(), &[&id]).await?;
        row.as_ref().map(Booking::try_from).transpose()
    }
}
