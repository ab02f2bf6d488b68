//! Booking operations: validate, run one store call, shape the response.

use serde_json::{json, Value};

use crate::bookings::model::BookingId;
use crate::bookings::store::{BookingStore, StoreError};
use crate::bookings::validation::validate_booking;
use crate::error::ApiError;
use crate::http::response::ApiResponse;
use crate::observability::metrics;

fn persistence(operation: &'static str, context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |source| {
        tracing::error!(operation, error = %source, "{}", context);
        metrics::record_store_error(operation);
        ApiError::Persistence { context, source }
    }
}

pub async fn list_bookings(store: &dyn BookingStore) -> Result<ApiResponse, ApiError> {
    let bookings = store
        .list()
        .await
        .map_err(persistence("list", "Failed to fetch bookings"))?;
    Ok(ApiResponse::ok(bookings))
}

pub async fn create_booking(store: &dyn BookingStore, body: &Value) -> Result<ApiResponse, ApiError> {
    let input = validate_booking(body)?;
    let booking = store
        .create(input)
        .await
        .map_err(persistence("create", "Failed to create booking"))?;

    tracing::info!(booking_id = booking.id, "Booking created");
    Ok(ApiResponse::created(booking))
}

pub async fn get_booking(store: &dyn BookingStore, id: BookingId) -> Result<ApiResponse, ApiError> {
    store
        .get(id)
        .await
        .map_err(persistence("get", "Failed to fetch booking"))?
        .map(ApiResponse::ok)
        .ok_or(ApiError::BookingNotFound)
}

pub async fn update_booking(
    store: &dyn BookingStore,
    id: BookingId,
    body: &Value,
) -> Result<ApiResponse, ApiError> {
    let input = validate_booking(body)?;
    let booking = store
        .update(id, input)
        .await
        .map_err(persistence("update", "Failed to update booking"))?
        .ok_or(ApiError::BookingNotFound)?;

    tracing::info!(booking_id = id, "Booking updated");
    Ok(ApiResponse::ok(json!({
        "message": "Booking updated successfully!",
        "update": booking,
    })))
}

pub async fn delete_booking(store: &dyn BookingStore, id: BookingId) -> Result<ApiResponse, ApiError> {
    let booking = store
        .delete(id)
        .await
        .map_err(persistence("delete", "Failed to delete booking"))?
        .ok_or(ApiError::BookingNotFound)?;

    tracing::info!(booking_id = id, "Booking deleted");
    Ok(ApiResponse::ok(json!({
        "message": "Booking deleted successfully!",
        "deleted": booking,
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::bookings::memory::MemoryBookingStore;

    fn haircut() -> Value {
        json!({
            "title": "Cut",
            "description": "Haircut",
            "date": "2024-05-01",
            "time": "10:00",
            "phone_number": "555-1111"
        })
    }

    #[tokio::test]
    async fn create_then_get_returns_same_row() {
        let store = MemoryBookingStore::new();
        let created = create_booking(&store, &haircut()).await.unwrap();
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["email"], "example@gmail.com");
        assert_eq!(created.body["user_id"], "1");

        let id = created.body["id"].as_i64().unwrap();
        let fetched = get_booking(&store, id).await.unwrap();
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, created.body);
    }

    #[tokio::test]
    async fn invalid_body_never_reaches_the_store() {
        let store = MemoryBookingStore::new();
        let mut body = haircut();
        body.as_object_mut().unwrap().remove("title");

        let err = create_booking(&store, &body).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingFields { .. }));

        let err = update_booking(&store, 1, &body).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingFields { .. }));
        assert_eq!(store.statement_count(), 0);
    }

    #[tokio::test]
    async fn update_and_delete_wrap_the_row() {
        let store = MemoryBookingStore::new();
        let id = create_booking(&store, &haircut()).await.unwrap().body["id"]
            .as_i64()
            .unwrap();

        let mut body = haircut();
        body["title"] = json!("Trim");
        body["email"] = json!("kim@example.com");
        let updated = update_booking(&store, id, &body).await.unwrap();
        assert_eq!(updated.body["message"], "Booking updated successfully!");
        assert_eq!(updated.body["update"]["title"], "Trim");
        assert_eq!(updated.body["update"]["email"], "kim@example.com");
        assert_eq!(updated.body["update"]["user_id"], "1");

        let deleted = delete_booking(&store, id).await.unwrap();
        assert_eq!(deleted.body["message"], "Booking deleted successfully!");
        assert_eq!(deleted.body["deleted"], updated.body["update"]);

        assert!(matches!(get_booking(&store, id).await, Err(ApiError::BookingNotFound)));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryBookingStore::new();
        assert!(matches!(get_booking(&store, 7).await, Err(ApiError::BookingNotFound)));
        assert!(matches!(
            update_booking(&store, 7, &haircut()).await,
            Err(ApiError::BookingNotFound)
        ));
        assert!(matches!(delete_booking(&store, 7).await, Err(ApiError::BookingNotFound)));
    }

    #[tokio::test]
    async fn store_failures_name_the_operation() {
        let store = MemoryBookingStore::new();
        store.fail_with(Some("db down"));

        let cases = [
            (list_bookings(&store).await, "Failed to fetch bookings"),
            (create_booking(&store, &haircut()).await, "Failed to create booking"),
            (get_booking(&store, 1).await, "Failed to fetch booking"),
            (update_booking(&store, 1, &haircut()).await, "Failed to update booking"),
            (delete_booking(&store, 1).await, "Failed to delete booking"),
        ];

        for (result, expected) in cases {
            match result {
                Err(ApiError::Persistence { context, source }) => {
                    assert_eq!(context, expected);
                    assert_eq!(source.to_string(), "db down");
                }
                other => panic!("expected persistence error, got {:?}", other),
            }
        }
    }
}
