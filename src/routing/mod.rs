//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! ApiRequest (method, path, body)
//!     → dispatch.rs (strip /api prefix, split segments)
//!     → router.rs (route table lookup)
//!     → matcher.rs (evaluate path patterns, capture :id)
//!     → Matched operation | MethodNotAllowed | NotFound
//!     → bookings::handlers (one operation)
//! ```
//!
//! # Design Decisions
//! - Routes declared once at startup, immutable at runtime
//! - No regex (segment comparison only)
//! - Deterministic: same input always resolves to the same operation
//! - The `:id` check runs before the method check

pub mod dispatch;
pub mod matcher;
pub mod router;

pub use dispatch::BookingApi;
pub use router::{Operation, RouteTable};
