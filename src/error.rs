//! Request-level error taxonomy.
//!
//! Every failure a request can end in is one `ApiError` variant; the
//! response formatter in `http::response` turns it into a status code and
//! JSON body.

use axum::http::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::bookings::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A write body lacks one or more required fields.
    #[error("Missing required fields")]
    MissingFields {
        missing: Vec<&'static str>,
        received: Value,
    },

    /// A write body is not JSON, or could not be read.
    #[error("Malformed JSON body")]
    MalformedBody(String),

    /// The `:id` segment is not a number.
    #[error("Invalid booking ID - must be a number")]
    InvalidId,

    #[error("Booking not found")]
    BookingNotFound,

    #[error("Method {method} Not Allowed on {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allow: Vec<Method>,
    },

    #[error("Endpoint not found")]
    RouteNotFound {
        requested_path: String,
        available: Vec<String>,
    },

    /// The store failed; `context` names the operation.
    #[error("{context}")]
    Persistence {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Internal server error")]
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields { .. } | ApiError::MalformedBody(_) | ApiError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::BookingNotFound | ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Persistence { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Server faults, as opposed to client mistakes.
    pub fn is_server_fault(&self) -> bool {
        self.status().is_server_error()
    }
}
