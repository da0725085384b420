//! Assertions for the shared error body `{success, message, code, trace_id}`.

use actix_web::body::{to_bytes, BoxBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub success: bool,
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert the error contract on raw response parts and return the parsed body.
///
/// Checks status, `success: false`, the code, and that the body `trace_id`
/// equals the `x-trace-id` header.
pub fn assert_error_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body should be an error body ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let header_trace = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");

    assert!(!parsed.success, "error body must carry success=false");
    assert_eq!(parsed.code, expected_code);
    assert_eq!(
        parsed.trace_id, header_trace,
        "trace_id in body should match x-trace-id header"
    );
    assert!(!parsed.message.is_empty(), "message should not be empty");

    parsed
}

/// Assert the error contract on a test-service response.
pub async fn assert_error_response(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("failed to read response body"));

    assert_error_parts(status, &headers, &body, expected_status, expected_code)
}
