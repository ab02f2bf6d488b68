//! Booking System API Library
//!
//! CRUD over a single `bookings` table: an HTTP request is routed to one
//! operation, validated, mapped to one parameterized statement, and
//! answered with JSON.

pub mod bookings;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use bookings::{BookingStore, MemoryBookingStore, PgBookingStore};
pub use config::ApiConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::BookingApi;
