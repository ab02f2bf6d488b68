//! Booking entity and write payload.

use serde::{Deserialize, Serialize};

/// Storage-assigned booking identifier.
pub type BookingId = i64;

/// Used when a write omits `email`.
pub const DEFAULT_EMAIL: &str = "example@gmail.com";

/// Used when a write omits `user_id`.
pub const DEFAULT_USER_ID: &str = "1";

/// A stored booking row.
///
/// `date` and `time` are carried as text; the store normalizes them
/// (`YYYY-MM-DD`, `HH:MM[:SS]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: String,
}

/// Every writable field of a booking, with defaults already applied.
///
/// Create and update both take a full `BookingInput`; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInput {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: String,
}

impl BookingInput {
    /// Attach a storage-assigned id.
    pub fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            phone_number: self.phone_number,
            email: self.email,
            user_id: self.user_id,
        }
    }
}
