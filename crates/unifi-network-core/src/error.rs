// crates/unifi-network-core/src/error.rs
// ============================================================================
// Module: Client Error Taxonomy
// Description: Structured failures surfaced by the client engine.
// Purpose: Classify every failure for retry decisions while preserving the
//          server's correlation token.
// Dependencies: crate::transport, unifi-network-filter
// ============================================================================

//! ## Overview
//! One closed error enum covers the engine: filter compilation failures,
//! transport failures, API (4xx) and server (5xx) responses, retry
//! exhaustion, envelope decode failures, caller-side request validation, and
//! cooperative cancellation.
//!
//! Propagation policy: parse and validation errors are caller-construction
//! bugs, surfaced immediately and never retried. Transport and server errors
//! are retried per policy and surfaced as [`ApiClientError::RetryExhausted`]
//! once the attempt budget is spent. API and decode errors always surface
//! immediately. The server's `requestId` is preserved wherever present; it is
//! the only cross-system correlation key for 5xx failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use unifi_network_filter::ParseError;
use unifi_network_filter::ValidationError;

use crate::transport::TransportFailure;
use crate::transport::TransportFailureKind;

// ============================================================================
// SECTION: Retry Classification
// ============================================================================

/// Whether a failure may be retried.
///
/// # Invariants
/// - Classification depends only on the failure itself, never on attempt
///   counts or caller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Another attempt may succeed (network failure, timeout, 5xx).
    Retryable,
    /// Retrying cannot change the outcome (4xx, parse, validation, decode).
    Fatal,
}

// ============================================================================
// SECTION: Error Taxonomy
// ============================================================================

/// Failures surfaced by the client engine.
///
/// # Invariants
/// - `request_id` fields hold the server token verbatim when present.
/// - `RetryExhausted` only ever wraps a retryable failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiClientError {
    /// Filter string failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Filter expression violated the resource schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No HTTP response was obtained.
    #[error("transport failure ({kind}): {message}")]
    Transport {
        /// Transport failure classification.
        kind: TransportFailureKind,
        /// Human-readable failure description.
        message: String,
    },
    /// The API rejected the request (4xx).
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Symbolic status name when the body carried one.
        status_name: Option<String>,
        /// Server-provided message or a status fallback.
        message: String,
        /// Server-side failure timestamp when the body carried one.
        timestamp: Option<String>,
        /// Opaque correlation token when present.
        request_id: Option<String>,
        /// Request path echoed by the server when present.
        request_path: Option<String>,
    },
    /// The server failed to process the request (5xx).
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Symbolic status name when the body carried one.
        status_name: Option<String>,
        /// Server-provided message or a status fallback.
        message: String,
        /// Server-side failure timestamp when the body carried one.
        timestamp: Option<String>,
        /// Opaque correlation token; mandatory on well-formed 5xx bodies.
        request_id: Option<String>,
        /// Request path echoed by the server when present.
        request_path: Option<String>,
    },
    /// The retry budget was spent on a retryable failure.
    #[error("retries exhausted after {attempts} attempt(s): {last}")]
    RetryExhausted {
        /// Attempts performed, including the first.
        attempts: u32,
        /// The last observed retryable failure.
        last: Box<ApiClientError>,
    },
    /// A 2xx response body did not match the expected envelope shape.
    #[error("envelope decode failed: {message}")]
    Decode {
        /// Description of the shape violation.
        message: String,
    },
    /// The request was rejected before any network call.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the bound or parameter violation.
        message: String,
    },
    /// The operation was cancelled between page fetches.
    #[error("operation cancelled")]
    Cancelled,
}

impl ApiClientError {
    /// Classifies this failure for the retry policy.
    #[must_use]
    pub const fn retry_class(&self) -> RetryClass {
        match self {
            Self::Transport {
                ..
            }
            | Self::Server {
                ..
            } => RetryClass::Retryable,
            Self::Parse(_)
            | Self::Validation(_)
            | Self::Api {
                ..
            }
            | Self::RetryExhausted {
                ..
            }
            | Self::Decode {
                ..
            }
            | Self::InvalidRequest {
                ..
            }
            | Self::Cancelled => RetryClass::Fatal,
        }
    }

    /// Returns the server correlation token, looking through retry wrapping.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api {
                request_id, ..
            }
            | Self::Server {
                request_id, ..
            } => request_id.as_deref(),
            Self::RetryExhausted {
                last, ..
            } => last.request_id(),
            _ => None,
        }
    }

    /// Returns a stable label for telemetry.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Validation(_) => "validation",
            Self::Transport {
                ..
            } => "transport",
            Self::Api {
                ..
            } => "api",
            Self::Server {
                ..
            } => "server",
            Self::RetryExhausted {
                ..
            } => "retry_exhausted",
            Self::Decode {
                ..
            } => "decode",
            Self::InvalidRequest {
                ..
            } => "invalid_request",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<TransportFailure> for ApiClientError {
    fn from(failure: TransportFailure) -> Self {
        Self::Transport {
            kind: failure.kind,
            message: failure.message,
        }
    }
}
