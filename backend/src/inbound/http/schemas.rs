//! OpenAPI schema definitions for domain types that do not derive `ToSchema`.
//!
//! The domain error is serialised through a DTO, so its schema is described
//! here, in the adapter layer, instead of on the type itself.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No identity, or login required.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// Missing, or owned by someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// Clashes with stored state, such as a taken slug.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "trip 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found")]
    message: String,
    /// Correlation identifier matching the `trace-id` header.
    #[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    trace_id: Option<String>,
    /// Supplementary error details such as the offending field.
    details: Option<serde_json::Value>,
}
