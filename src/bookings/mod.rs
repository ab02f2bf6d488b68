//! Bookings subsystem.
//!
//! # Data Flow
//! ```text
//! Write request body
//!     → validation.rs (presence checks, defaults)
//!     → handlers.rs (one operation, one statement)
//!     → store.rs trait → postgres.rs | memory.rs
//!     → ApiResponse (row, wrapped row, or error)
//! ```
//!
//! # Design Decisions
//! - Validation runs before a connection is checked out
//! - "No row matched" is `Ok(None)` from the store, not an error
//! - Store failures are logged once, where they are mapped to a response

pub mod handlers;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;
pub mod validation;

pub use memory::MemoryBookingStore;
pub use model::{Booking, BookingId, BookingInput, DEFAULT_EMAIL, DEFAULT_USER_ID};
pub use postgres::PgBookingStore;
pub use store::{BookingStore, StoreError};
