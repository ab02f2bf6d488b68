//! Tower middleware wrapped around the API router.

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
