//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, request ID, timeout, CORS, panic capture)
//! - Convert axum requests into `ApiRequest` and back
//! - Bind server to listener with graceful shutdown

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::bookings::store::BookingStore;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::middleware::{
    cors_layer, propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID,
};
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::BookingApi;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: BookingApi,
    pub max_body_bytes: usize,
}

/// HTTP server for the booking API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
}

impl HttpServer {
    /// Create a new HTTP server backed by `store`.
    pub fn new(config: ApiConfig, store: Arc<dyn BookingStore>) -> Self {
        let state = AppState {
            api: BookingApi::new(store),
            max_body_bytes: config.listener.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(api_handler))
            .route("/", any(api_handler))
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(cors_layer(&config.cors))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// Catch-all handler: every request goes through the route table.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            metrics::record_request(method.as_str(), "none", 400, start_time);
            return ApiResponse::from(ApiError::MalformedBody(e.to_string())).into_response();
        }
    };

    let api_request = ApiRequest {
        method,
        path,
        headers: parts.headers,
        body,
    };
    let (response, dispatched) = state.api.dispatch(&api_request).await;

    tracing::debug!(
        request_id = %request_id,
        operation = dispatched.label(),
        status = response.status.as_u16(),
        "Request complete"
    );
    metrics::record_request(
        api_request.method.as_str(),
        dispatched.label(),
        response.status.as_u16(),
        start_time,
    );

    response.into_response()
}

/// Turn a handler panic into the internal-error envelope.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(error = %message, "Request handler panicked");
    ApiResponse::from(ApiError::Internal { message }).into_response()
}
