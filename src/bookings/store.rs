//! Persistence seam for bookings.

use async_trait::async_trait;
use thiserror::Error;

use crate::bookings::model::{Booking, BookingId, BookingInput};

/// Failure raised by a booking store.
///
/// The `Display` text is what clients see in the `message` field of a
/// persistence error response.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error(transparent)]
    Db(#[from] tokio_postgres::Error),

    #[error("unexpected row shape: {0}")]
    Decode(String),

    #[error("{0}")]
    Unavailable(String),
}

/// One statement per call; `Ok(None)` means no row matched the id.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// all bookings, newest date/time first, ties by id ascending
    async fn list(&self) -> Result<Vec<Booking>, StoreError>;
    /// insert and return the row with its generated id
    async fn create(&self, input: BookingInput) -> Result<Booking, StoreError>;
    /// fetch one booking
    async fn get(&self, id: BookingId) -> Result<Option<Booking>, StoreError>;
    /// replace every writable field of a booking
    async fn update(&self, id: BookingId, input: BookingInput)
        -> Result<Option<Booking>, StoreError>;
    /// remove a booking, returning the removed row
    async fn delete(&self, id: BookingId) -> Result<Option<Booking>, StoreError>;
}
