//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("contact is not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("username already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("database unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, trace, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let (status, trace, payload) = response_payload(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), INTERNAL_MESSAGE);
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::invalid_request("firstName is required")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"violations": [{"field": "firstName"}]}));

    let (status, trace, payload) = response_payload(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "firstName is required");
    assert_eq!(
        payload.details(),
        Some(&json!({"violations": [{"field": "firstName"}]}))
    );
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (_, trace, payload) = response_payload(&Error::not_found("contact is not found")).await;

    assert!(trace.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
    assert_eq!(err.details(), None);
}
