// crates/unifi-network-core/tests/envelope.rs
// ============================================================================
// Test Module: Response Envelopes
// Coverage: Strict page decoding, lenient error decoding, and status
//           classification.
// ============================================================================
//! ## Overview
//! Integration tests for pagination-envelope and error-envelope decoding.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use serde_json::json;
use support::TestResult;
use support::ensure;
use support::fail;
use unifi_network_core::ApiClientError;
use unifi_network_core::PageEnvelope;
use unifi_network_core::RetryClass;
use unifi_network_core::decode_error;
use unifi_network_core::decode_page;

// ========================================================================
// SECTION: Page Envelope
// ========================================================================

/// Tests a well-formed page body decodes with all fields.
#[test]
fn decodes_well_formed_page() -> TestResult {
    let body = json!({
        "offset": 25,
        "limit": 25,
        "count": 2,
        "totalCount": 27,
        "data": ["a", "b"],
    })
    .to_string();

    let page: PageEnvelope<String> = decode_page(body.as_bytes())?;
    ensure(page.offset == 25, "expected offset 25")?;
    ensure(page.limit == 25, "expected limit 25")?;
    ensure(page.count == 2, "expected count 2")?;
    ensure(page.total_count == 27, "expected totalCount 27")?;
    ensure(page.data == ["a", "b"], "expected both items")?;
    Ok(())
}

/// Tests unknown envelope fields are tolerated.
#[test]
fn tolerates_extra_page_fields() -> TestResult {
    let body = json!({
        "offset": 0,
        "limit": 25,
        "count": 0,
        "totalCount": 0,
        "data": [],
        "nextCursor": "opaque",
    })
    .to_string();

    let page: PageEnvelope<String> = decode_page(body.as_bytes())?;
    ensure(page.data.is_empty(), "expected empty page")?;
    Ok(())
}

/// Tests a missing required field is a decode failure.
#[test]
fn rejects_missing_page_field() -> TestResult {
    let body = json!({
        "offset": 0,
        "limit": 25,
        "count": 0,
        "data": [],
    })
    .to_string();

    match decode_page::<String>(body.as_bytes()) {
        Err(ApiClientError::Decode {
            message,
        }) => ensure(message.contains("totalCount"), "expected the missing field named"),
        other => fail(format!("expected Decode, got {other:?}")),
    }
}

/// Tests a count that disagrees with the data length is rejected.
#[test]
fn rejects_count_mismatch() -> TestResult {
    let body = json!({
        "offset": 0,
        "limit": 25,
        "count": 3,
        "totalCount": 3,
        "data": ["only"],
    })
    .to_string();

    match decode_page::<String>(body.as_bytes()) {
        Err(ApiClientError::Decode {
            message,
        }) => ensure(
            message.contains("count field is 3") && message.contains("1 item"),
            "expected both counts in the message",
        ),
        other => fail(format!("expected Decode, got {other:?}")),
    }
}

/// Tests non-JSON bodies are decode failures, not panics.
#[test]
fn rejects_non_json_page_body() -> TestResult {
    match decode_page::<String>(b"<html>gateway timeout</html>") {
        Err(ApiClientError::Decode {
            ..
        }) => Ok(()),
        other => fail(format!("expected Decode, got {other:?}")),
    }
}

// ========================================================================
// SECTION: Error Envelope
// ========================================================================

/// Tests a 4xx body's fields are all preserved.
#[test]
fn classifies_client_error_with_full_body() -> TestResult {
    let body = json!({
        "statusCode": 404,
        "statusName": "NOT_FOUND",
        "message": "device not found",
        "timestamp": "2024-01-15T10:30:00Z",
        "requestPath": "/v1/sites/s1/devices/d9",
        "requestId": "req-404",
    })
    .to_string();

    match decode_error(404, body.as_bytes()) {
        ApiClientError::Api {
            status,
            status_name,
            message,
            timestamp,
            request_id,
            request_path,
        } => {
            ensure(status == 404, "expected 404 status")?;
            ensure(status_name.as_deref() == Some("NOT_FOUND"), "expected status name")?;
            ensure(message == "device not found", "expected body message")?;
            ensure(
                timestamp.as_deref() == Some("2024-01-15T10:30:00Z"),
                "expected echoed timestamp",
            )?;
            ensure(request_id.as_deref() == Some("req-404"), "expected correlation token")?;
            ensure(
                request_path.as_deref() == Some("/v1/sites/s1/devices/d9"),
                "expected echoed path",
            )?;
        }
        other => return fail(format!("expected Api, got {other:?}")),
    }
    Ok(())
}

/// Tests 5xx statuses classify as retryable server errors.
#[test]
fn classifies_server_errors_as_retryable() -> TestResult {
    let error = decode_error(503, br#"{"message": "upstream down"}"#);
    match &error {
        ApiClientError::Server {
            status: 503,
            message,
            ..
        } => ensure(message == "upstream down", "expected body message")?,
        other => return fail(format!("expected Server, got {other:?}")),
    }
    ensure(error.retry_class() == RetryClass::Retryable, "expected retryable class")?;

    let client = decode_error(429, b"{}");
    ensure(
        client.retry_class() == RetryClass::Fatal,
        "expected 4xx to stay fatal",
    )?;
    Ok(())
}

/// Tests absent or malformed bodies fall back to a status message.
#[test]
fn falls_back_on_unparseable_error_body() -> TestResult {
    for body in [b"" as &[u8], b"not json", br#"{"message": ""}"#] {
        match decode_error(503, body) {
            ApiClientError::Server {
                message,
                request_id,
                ..
            } => {
                ensure(message == "HTTP 503 error", "expected status fallback message")?;
                ensure(request_id.is_none(), "expected no correlation token")?;
            }
            other => return fail(format!("expected Server, got {other:?}")),
        }
    }
    Ok(())
}
