//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;
use crate::domain::trips::TripId;

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidValue => "invalid_value",
        }
    }
}

fn field_error(field: &str, message: String, code: ValidationCode, value: Option<&str>) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field, "value": value, "code": code.as_str() }),
        None => json!({ "field": field, "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(
        field,
        format!("missing required field: {field}"),
        ValidationCode::MissingField,
        None,
    )
}

pub(crate) fn invalid_value_error(field: &str, value: &str, reason: impl std::fmt::Display) -> Error {
    field_error(
        field,
        format!("{field} is invalid: {reason}"),
        ValidationCode::InvalidValue,
        Some(value),
    )
}

/// Parse a trip id from a path segment.
pub(crate) fn parse_trip_id(value: &str) -> Result<TripId, Error> {
    value.parse().map_err(|_| {
        field_error(
            "id",
            "id must be a valid UUID".to_owned(),
            ValidationCode::InvalidUuid,
            Some(value),
        )
    })
}
