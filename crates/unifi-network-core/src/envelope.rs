// crates/unifi-network-core/src/envelope.rs
// ============================================================================
// Module: Response Envelopes
// Description: Paginated and error envelope decoding.
// Purpose: Turn raw response bodies into typed pages or classified errors.
// Dependencies: serde, serde_json, crate::error
// ============================================================================

//! ## Overview
//! List endpoints wrap results in a pagination envelope (`offset`, `limit`,
//! `count`, `totalCount`, `data`). Error responses carry a looser envelope
//! (`statusCode`, `statusName`, `message`, `timestamp`, `requestPath`,
//! `requestId`), every field of which may be absent.
//!
//! Decoding is asymmetric on purpose: the page envelope is strict (a missing
//! or mistyped field is a [`ApiClientError::Decode`] failure), while the
//! error envelope is lenient (an unparseable error body still yields a
//! classified error with a status-derived fallback message).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiClientError;

// ============================================================================
// SECTION: Page Envelope
// ============================================================================

/// One page of a paginated collection response.
///
/// # Invariants
/// - `count` always equals `data.len()` after a successful decode.
/// - `total_count` is the server's report at fetch time and may drift across
///   pages of one traversal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Zero-based index of the first item in this page.
    pub offset: u64,
    /// Page size the server applied.
    pub limit: u64,
    /// Number of items in `data`.
    pub count: u64,
    /// Collection size reported by the server at fetch time.
    pub total_count: u64,
    /// The items themselves.
    pub data: Vec<T>,
}

/// Decodes a 2xx list-endpoint body into a page envelope.
///
/// # Errors
///
/// Returns [`ApiClientError::Decode`] when the body is not valid JSON, a
/// required field is missing or mistyped, or `count` disagrees with the
/// actual item count.
pub fn decode_page<T>(body: &[u8]) -> Result<PageEnvelope<T>, ApiClientError>
where
    T: DeserializeOwned,
{
    let envelope: PageEnvelope<T> =
        serde_json::from_slice(body).map_err(|source| ApiClientError::Decode {
            message: format!("pagination envelope: {source}"),
        })?;
    let actual = u64::try_from(envelope.data.len()).unwrap_or(u64::MAX);
    if envelope.count != actual {
        return Err(ApiClientError::Decode {
            message: format!(
                "pagination envelope: count field is {} but data holds {actual} item(s)",
                envelope.count
            ),
        });
    }
    Ok(envelope)
}

/// Decodes a 2xx single-object body.
///
/// # Errors
///
/// Returns [`ApiClientError::Decode`] when the body is not valid JSON for
/// the expected type.
pub fn decode_json<T>(body: &[u8]) -> Result<T, ApiClientError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| ApiClientError::Decode {
        message: format!("response body: {source}"),
    })
}

// ============================================================================
// SECTION: Error Envelope
// ============================================================================

/// Error body shape returned by the API on non-2xx statuses.
///
/// Every field is optional: real controllers omit fields freely, and decode
/// failures here must never mask the underlying HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    /// Numeric status echoed in the body.
    status_code: Option<u16>,
    /// Symbolic status name.
    status_name: Option<String>,
    /// Human-readable error description.
    message: Option<String>,
    /// Server-side timestamp of the failure.
    timestamp: Option<String>,
    /// Request path as the server saw it.
    request_path: Option<String>,
    /// Opaque correlation token.
    request_id: Option<String>,
}

/// Classifies a non-2xx response into an API (4xx) or server (5xx) error.
///
/// The body is parsed leniently; when it is absent or malformed the error
/// still carries a status-derived fallback message.
#[must_use]
pub fn decode_error(status: u16, body: &[u8]) -> ApiClientError {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
    let message = envelope
        .message
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("HTTP {status} error"));
    if status >= 500 {
        ApiClientError::Server {
            status,
            status_name: envelope.status_name,
            message,
            timestamp: envelope.timestamp,
            request_id: envelope.request_id,
            request_path: envelope.request_path,
        }
    } else {
        ApiClientError::Api {
            status,
            status_name: envelope.status_name,
            message,
            timestamp: envelope.timestamp,
            request_id: envelope.request_id,
            request_path: envelope.request_path,
        }
    }
}
