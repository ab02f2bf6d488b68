//! Response formatting.
//!
//! # Responsibilities
//! - Map each outcome to a status code and JSON body
//! - Set the `Allow` header on 405 responses
//! - Convert into an axum response at the edge
//!
//! # Design Decisions
//! - Error bodies always carry an `error` string; extra fields depend on the kind
//! - Persistence errors echo the store's message to the client

use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::bookings::validation::REQUIRED_FIELDS;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ApiResponse {
    pub fn json(status: StatusCode, body: impl Serialize) -> Self {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => return ApiError::Internal { message: e.to_string() }.into(),
        };
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    pub fn ok(body: impl Serialize) -> Self {
        Self::json(StatusCode::OK, body)
    }

    pub fn created(body: impl Serialize) -> Self {
        Self::json(StatusCode::CREATED, body)
    }

    /// Value of the `Allow` header, if any.
    pub fn allow(&self) -> Option<&str> {
        self.headers
            .get(header::ALLOW)
            .and_then(|v| v.to_str().ok())
    }
}

/// RFC 3339 timestamp for response envelopes.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn allow_header(methods: &[Method]) -> Option<HeaderValue> {
    let joined = methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    HeaderValue::from_str(&joined).ok()
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        let mut headers = HeaderMap::new();
        let error = err.to_string();

        let body = match err {
            ApiError::MissingFields { missing, received } => json!({
                "error": error,
                "required": REQUIRED_FIELDS,
                "missing": missing,
                "received": received,
            }),
            ApiError::MalformedBody(message) => json!({ "error": error, "message": message }),
            ApiError::InvalidId | ApiError::BookingNotFound => json!({ "error": error }),
            ApiError::MethodNotAllowed { allow, .. } => {
                if let Some(value) = allow_header(&allow) {
                    headers.insert(header::ALLOW, value);
                }
                json!({ "error": error })
            }
            ApiError::RouteNotFound {
                requested_path,
                available,
            } => json!({
                "error": error,
                "requestedPath": requested_path,
                "availableEndpoints": available,
            }),
            ApiError::Persistence { source, .. } => json!({
                "error": error,
                "message": source.to_string(),
            }),
            ApiError::Internal { message } => json!({
                "error": error,
                "message": message,
                "timestamp": timestamp(),
            }),
        };

        Self {
            status,
            headers,
            body,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::store::StoreError;

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let resp = ApiResponse::from(ApiError::MethodNotAllowed {
            method: Method::PATCH,
            path: "/bookings".into(),
            allow: vec![Method::GET, Method::POST],
        });

        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.allow(), Some("GET, POST"));
        assert_eq!(
            resp.body,
            json!({ "error": "Method PATCH Not Allowed on /bookings" })
        );
    }

    #[test]
    fn missing_fields_body_lists_required_and_received() {
        let resp = ApiResponse::from(ApiError::MissingFields {
            missing: vec!["title"],
            received: json!({ "description": "x" }),
        });

        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Missing required fields");
        assert_eq!(
            resp.body["required"],
            json!(["title", "description", "date", "time", "phone_number"])
        );
        assert_eq!(resp.body["missing"], json!(["title"]));
        assert_eq!(resp.body["received"], json!({ "description": "x" }));
    }

    #[test]
    fn persistence_error_echoes_store_message() {
        let resp = ApiResponse::from(ApiError::Persistence {
            context: "Failed to fetch bookings",
            source: StoreError::Unavailable("connection refused".into()),
        });

        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.body,
            json!({ "error": "Failed to fetch bookings", "message": "connection refused" })
        );
    }

    #[test]
    fn internal_error_carries_timestamp() {
        let resp = ApiResponse::from(ApiError::Internal {
            message: "boom".into(),
        });
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body["error"], "Internal server error");
        assert_eq!(resp.body["message"], "boom");
        assert!(resp.body["timestamp"].is_string());
    }
}
