//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (request ID, trace span, timeout, CORS preflight, panic capture)
//!     → request.rs (ApiRequest: method, path, headers, body)
//!     → routing::dispatch (one operation)
//!     → response.rs (status, Allow header, JSON body)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::X_REQUEST_ID;
pub use request::ApiRequest;
pub use response::ApiResponse;
pub use server::HttpServer;
