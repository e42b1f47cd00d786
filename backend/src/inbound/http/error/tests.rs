//! Regression coverage for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("pool exhausted while replacing trip")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "UPDATE trips"}))
}

async fn decode(error: &Error, expected_status: StatusCode) -> (Option<String>, Error) {
    let response = ResponseError::error_response(error);
    assert_eq!(response.status(), expected_status);

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (header, payload)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no identity"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("slug taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let (header, payload) = decode(&internal_error, StatusCode::INTERNAL_SERVER_ERROR).await;

    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::not_found("trip 42 not found")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"tripId": "42"}));

    let (header, payload) = decode(&error, StatusCode::NOT_FOUND).await;

    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "trip 42 not found");
    assert_eq!(payload.details(), Some(&json!({"tripId": "42"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::conflict("slug `tokyo-week` is already taken");

    let (header, payload) = decode(&error, StatusCode::CONFLICT).await;

    assert!(header.is_none());
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[rstest]
#[actix_web::test]
async fn store_outage_asks_clients_to_retry() {
    let error = Error::service_unavailable("trip store unreachable").with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&error);

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let retry_after = response
        .headers()
        .get(actix_web::http::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok());
    assert_eq!(retry_after, Some(RETRY_AFTER_SECS.to_string().as_str()));
}

#[rstest]
#[actix_web::test]
async fn not_found_carries_no_retry_hint() {
    let response = ResponseError::error_response(&Error::not_found("trip not found"));
    assert!(
        !response
            .headers()
            .contains_key(actix_web::http::header::RETRY_AFTER)
    );
}
