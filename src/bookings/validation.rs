//! Presence checks for create/update bodies.
//!
//! Runs before any pooled connection is checked out.

use serde_json::Value;

use crate::bookings::model::{BookingInput, DEFAULT_EMAIL, DEFAULT_USER_ID};
use crate::error::ApiError;

/// Fields that must be present and non-empty on every write.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "description", "date", "time", "phone_number"];

/// Check a write body and build the input for the store.
///
/// A field counts as present when it is truthy: not missing, not `null`,
/// not `""`, not `false`, not `0`.
pub fn validate_booking(body: &Value) -> Result<BookingInput, ApiError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.get(field).is_some_and(is_truthy))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::MissingFields {
            missing,
            received: body.clone(),
        });
    }

    Ok(BookingInput {
        title: text_field(body, "title"),
        description: text_field(body, "description"),
        date: text_field(body, "date"),
        time: text_field(body, "time"),
        phone_number: text_field(body, "phone_number"),
        email: optional_field(body, "email").unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
        user_id: optional_field(body, "user_id").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_field(body: &Value, field: &str) -> String {
    body.get(field).map(text).unwrap_or_default()
}

// absent and null both mean "use the default"
fn optional_field(body: &Value, field: &str) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(text(value)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn complete_body_gets_defaults() {
        let input = validate_booking(&json!({
            "title": "Cut",
            "description": "Haircut",
            "date": "2024-05-01",
            "time": "10:00",
            "phone_number": "555-1111"
        }))
        .unwrap();

        assert_eq!(input.title, "Cut");
        assert_eq!(input.date, "2024-05-01");
        assert_eq!(input.email, DEFAULT_EMAIL);
        assert_eq!(input.user_id, DEFAULT_USER_ID);
    }

    #[test]
    fn supplied_optionals_are_kept() {
        let input = validate_booking(&json!({
            "title": "Color",
            "description": "Full color",
            "date": "2024-06-02",
            "time": "14:30",
            "phone_number": "555-2222",
            "email": "ana@example.com",
            "user_id": 42
        }))
        .unwrap();

        assert_eq!(input.email, "ana@example.com");
        assert_eq!(input.user_id, "42");
    }

    #[test]
    fn null_optional_falls_back_to_default() {
        let input = validate_booking(&json!({
            "title": "Cut",
            "description": "Haircut",
            "date": "2024-05-01",
            "time": "10:00",
            "phone_number": "555-1111",
            "email": null
        }))
        .unwrap();
        assert_eq!(input.email, DEFAULT_EMAIL);
    }

    #[test]
    fn falsy_values_count_as_missing() {
        let body = json!({
            "title": "",
            "description": null,
            "date": "2024-05-01",
            "time": 0,
            "phone_number": "555-1111"
        });

        match validate_booking(&body) {
            Err(ApiError::MissingFields { missing, received }) => {
                assert_eq!(missing, vec!["title", "description", "time"]);
                assert_eq!(received, body);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn non_object_body_misses_everything() {
        match validate_booking(&Value::Null) {
            Err(ApiError::MissingFields { missing, .. }) => {
                assert_eq!(missing, REQUIRED_FIELDS.to_vec());
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }
}
