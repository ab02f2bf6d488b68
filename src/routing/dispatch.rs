//! Request dispatch.
//!
//! Turns an `ApiRequest` into exactly one operation and an `ApiResponse`.

use std::sync::Arc;

use serde_json::json;

use crate::bookings::handlers;
use crate::bookings::model::BookingId;
use crate::bookings::store::BookingStore;
use crate::error::ApiError;
use crate::http::request::ApiRequest;
use crate::http::response::{timestamp, ApiResponse};
use crate::routing::matcher::Params;
use crate::routing::router::{Operation, RouteMatch, RouteTable};

pub const SERVICE_NAME: &str = "Booking System API";

/// The booking API core: a route table plus an injected store.
#[derive(Clone)]
pub struct BookingApi {
    store: Arc<dyn BookingStore>,
    routes: Arc<RouteTable>,
}

/// What a dispatch did, for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub operation: Option<Operation>,
}

impl Dispatched {
    pub fn label(&self) -> &'static str {
        self.operation.map(Operation::name).unwrap_or("none")
    }
}

impl BookingApi {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self::with_routes(store, RouteTable::bookings())
    }

    pub fn with_routes(store: Arc<dyn BookingStore>, routes: RouteTable) -> Self {
        Self {
            store,
            routes: Arc::new(routes),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub async fn handle(&self, request: &ApiRequest) -> ApiResponse {
        self.dispatch(request).await.0
    }

    /// Resolve and run the request, reporting which operation ran.
    pub async fn dispatch(&self, request: &ApiRequest) -> (ApiResponse, Dispatched) {
        let mut dispatched = Dispatched { operation: None };
        let result = self.run(request, &mut dispatched).await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                if !err.is_server_fault() {
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        error = %err,
                        "Request rejected"
                    );
                }
                ApiResponse::from(err)
            }
        };
        (response, dispatched)
    }

    async fn run(
        &self,
        request: &ApiRequest,
        dispatched: &mut Dispatched,
    ) -> Result<ApiResponse, ApiError> {
        let prefix = self.routes.prefix();
        let segments = request
            .segments(prefix)
            .ok_or_else(|| self.route_not_found(request))?;

        let (operation, params) = match self.routes.resolve(&request.method, &segments) {
            RouteMatch::Matched { operation, params } => (operation, params),
            RouteMatch::MethodNotAllowed { allow, params } => {
                // a bad id is reported before a bad method
                booking_id(&params)?;
                return Err(ApiError::MethodNotAllowed {
                    method: request.method.clone(),
                    path: format!("/{}", segments.join("/")),
                    allow,
                });
            }
            RouteMatch::NotFound => return Err(self.route_not_found(request)),
        };
        dispatched.operation = Some(operation);

        let store = self.store.as_ref();
        match operation {
            Operation::ServiceInfo => Ok(self.service_info()),
            Operation::ListBookings => handlers::list_bookings(store).await,
            Operation::CreateBooking => {
                handlers::create_booking(store, &request.json_body()?).await
            }
            Operation::GetBooking => {
                let id = require_id(&params)?;
                handlers::get_booking(store, id).await
            }
            Operation::UpdateBooking => {
                let id = require_id(&params)?;
                handlers::update_booking(store, id, &request.json_body()?).await
            }
            Operation::DeleteBooking => {
                let id = require_id(&params)?;
                handlers::delete_booking(store, id).await
            }
        }
    }

    fn service_info(&self) -> ApiResponse {
        ApiResponse::ok(json!({
            "name": SERVICE_NAME,
            "message": format!("{} is running!", SERVICE_NAME),
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": timestamp(),
            "endpoints": self.routes.catalogue(),
        }))
    }

    fn route_not_found(&self, request: &ApiRequest) -> ApiError {
        ApiError::RouteNotFound {
            requested_path: request.path.clone(),
            available: self.routes.catalogue(),
        }
    }
}

/// Parse the `id` parameter if the route has one.
fn booking_id(params: &Params<'_>) -> Result<Option<BookingId>, ApiError> {
    params
        .get("id")
        .map(|raw| raw.parse::<BookingId>().map_err(|_| ApiError::InvalidId))
        .transpose()
}

fn require_id(params: &Params<'_>) -> Result<BookingId, ApiError> {
    booking_id(params)?.ok_or(ApiError::InvalidId)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::Value;

    use super::*;
    use crate::bookings::memory::MemoryBookingStore;

    fn api() -> (BookingApi, Arc<MemoryBookingStore>) {
        let store = Arc::new(MemoryBookingStore::new());
        (BookingApi::new(store.clone()), store)
    }

    const HAIRCUT: &str = r#"{"title":"Cut","description":"Haircut","date":"2024-05-01","time":"10:00","phone_number":"555-1111"}"#;

    #[tokio::test]
    async fn service_info_at_root() {
        let (api, _) = api();
        for path in ["/api", "/api/"] {
            let resp = api.handle(&ApiRequest::new(Method::GET, path)).await;
            assert_eq!(resp.status, StatusCode::OK);
            assert_eq!(resp.body["name"], SERVICE_NAME);
            assert_eq!(resp.body["version"], env!("CARGO_PKG_VERSION"));
            assert!(resp.body["endpoints"].as_array().unwrap().len() >= 6);
        }
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_without_a_statement() {
        let (api, store) = api();
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let resp = api
                .handle(&ApiRequest::new(method, "/api/bookings/abc").with_body(HAIRCUT))
                .await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST);
            assert_eq!(resp.body["error"], "Invalid booking ID - must be a number");
        }
        assert_eq!(store.statement_count(), 0);
    }

    #[tokio::test]
    async fn ids_beyond_i64_are_rejected_without_a_statement() {
        let (api, store) = api();
        let overflow = format!("/api/bookings/{}0", i64::MAX);
        for path in [overflow.as_str(), "/api/bookings/99999999999999999999"] {
            let resp = api.handle(&ApiRequest::new(Method::GET, path)).await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST);
            assert_eq!(resp.body["error"], "Invalid booking ID - must be a number");
        }

        let max = format!("/api/bookings/{}", i64::MAX);
        let resp = api.handle(&ApiRequest::new(Method::GET, &max)).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(store.statement_count(), 1);
    }

    #[tokio::test]
    async fn unsupported_methods_get_405_with_allow() {
        let (api, _) = api();

        let resp = api.handle(&ApiRequest::new(Method::DELETE, "/api/bookings")).await;
        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.allow(), Some("GET, POST"));
        assert_eq!(resp.body["error"], "Method DELETE Not Allowed on /bookings");

        let resp = api.handle(&ApiRequest::new(Method::POST, "/api/bookings/3")).await;
        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.allow(), Some("GET, PUT, DELETE"));
        assert_eq!(resp.body["error"], "Method POST Not Allowed on /bookings/3");
    }

    #[tokio::test]
    async fn unknown_paths_list_available_endpoints() {
        let (api, _) = api();
        for path in ["/api/rooms", "/health", "/api/bookings/1/notes"] {
            let resp = api.handle(&ApiRequest::new(Method::GET, path)).await;
            assert_eq!(resp.status, StatusCode::NOT_FOUND);
            assert_eq!(resp.body["error"], "Endpoint not found");
            assert_eq!(resp.body["requestedPath"], path);
            assert_eq!(
                resp.body["availableEndpoints"],
                json!(api.routes().catalogue())
            );
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let (api, store) = api();
        let resp = api
            .handle(&ApiRequest::new(Method::POST, "/api/bookings").with_body("{oops"))
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Malformed JSON body");
        assert_eq!(store.statement_count(), 0);
    }

    #[tokio::test]
    async fn empty_body_reports_missing_fields() {
        let (api, _) = api();
        let resp = api.handle(&ApiRequest::new(Method::POST, "/api/bookings")).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body["error"], "Missing required fields");
        assert_eq!(resp.body["received"], Value::Null);
    }

    #[tokio::test]
    async fn create_delete_get_scenario() {
        let (api, _) = api();

        let (created, dispatched) = api
            .dispatch(&ApiRequest::new(Method::POST, "/api/bookings").with_body(HAIRCUT))
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(dispatched.label(), "create");
        let id = created.body["id"].as_i64().unwrap();

        let path = format!("/api/bookings/{}", id);
        let deleted = api.handle(&ApiRequest::new(Method::DELETE, &path)).await;
        assert_eq!(deleted.status, StatusCode::OK);
        assert_eq!(deleted.body["message"], "Booking deleted successfully!");
        assert_eq!(deleted.body["deleted"], created.body);

        let missing = api.handle(&ApiRequest::new(Method::GET, &path)).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.body, json!({ "error": "Booking not found" }));
    }
}
