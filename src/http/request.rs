//! Framework-neutral inbound request.
//!
//! # Responsibilities
//! - Carry method, path, headers and raw body into the dispatcher
//! - Strip the API prefix and split the path into segments
//! - Decode the JSON body on demand (write paths only)
//!
//! # Design Decisions
//! - The body stays as raw bytes until an operation asks for it, so a
//!   malformed body never affects a read
//! - An empty body decodes to JSON `null`

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Path segments after `prefix`, or `None` when the path is outside it.
    ///
    /// Empty segments are dropped, so `/api/bookings/` and `/api/bookings`
    /// both yield `["bookings"]`.
    pub fn segments(&self, prefix: &str) -> Option<Vec<&str>> {
        let rest = self.path.strip_prefix(prefix)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        Some(rest.split('/').filter(|s| !s.is_empty()).collect())
    }

    pub fn json_body(&self) -> Result<Value, ApiError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| ApiError::MalformedBody(e.to_string()))
    }
}
