// crates/unifi-network-core/src/transport.rs
// ============================================================================
// Module: Transport Interface
// Description: Backend-agnostic HTTP capability and cancellation primitives.
// Purpose: Define the seam between the pagination executor and whatever
//          actually moves bytes.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The executor treats HTTP as an opaque capability: `send` takes a fully
//! described request and returns either a raw status-plus-body response or a
//! transport-level failure. Authentication headers, base-URL joining, and
//! TLS are the implementation's concern, not the core's.
//!
//! Cancellation is cooperative: a [`CancelToken`] is checked between network
//! calls; an in-flight response is never aborted mid-read by the core.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde_json::Value;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// HTTP method for an API request.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read-only retrieval.
    Get,
    /// State-modifying submission.
    Post,
    /// Resource deletion.
    Delete,
}

impl Method {
    /// Returns the wire-form method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described API request handed to the transport.
///
/// # Invariants
/// - `path` is relative to the API base URL and never contains query
///   parameters; those ride in `query` and are URL-encoded by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path relative to the API base URL.
    pub path: String,
    /// Query parameters in emission order.
    pub query: Vec<(String, String)>,
    /// Optional JSON request body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Builds a GET request for the given path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Builds a POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Builds a DELETE request for the given path.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Raw response produced by the transport.
///
/// # Invariants
/// - `body` is the complete response body; the transport enforces its own
///   size limits before handing it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Complete response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns whether the status is in the 2xx success class.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Classification of a transport-level failure.
///
/// # Invariants
/// - Variants are stable for telemetry labeling; all of them are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    /// Connection could not be established.
    Connect,
    /// Request or response timed out.
    Timeout,
    /// Any other I/O-level failure.
    Io,
}

impl TransportFailureKind {
    /// Returns a stable label for the failure kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport-level failure (no HTTP response was obtained).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// Failure classification.
    pub kind: TransportFailureKind,
    /// Human-readable failure description.
    pub message: String,
}

impl TransportFailure {
    /// Builds a failure of the given kind.
    #[must_use]
    pub fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportFailure {}

// ============================================================================
// SECTION: Transport Capability
// ============================================================================

/// Backend-agnostic HTTP capability.
///
/// Implementations own connection pooling, authentication headers, and
/// URL construction. They must be shareable across threads so the executor
/// can fetch pages concurrently.
pub trait Transport: Send + Sync {
    /// Issues a single HTTP request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure`] when no HTTP response was obtained.
    /// Non-2xx responses are returned as `Ok`; status handling is the
    /// executor's job.
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure>;
}

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// Shared cooperative cancellation signal.
///
/// # Invariants
/// - Once cancelled, a token never resets.
/// - Clones observe the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; takes effect between page fetches.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
