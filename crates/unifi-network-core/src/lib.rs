// crates/unifi-network-core/src/lib.rs
// ============================================================================
// Module: Client Engine Root
// Description: Public API surface for the request-execution engine.
// Purpose: Wire together envelopes, errors, retry, pagination, telemetry,
//          and the transport seam.
// Dependencies: crate::{envelope, error, executor, page, retry, telemetry,
//              transport}
// ============================================================================

//! ## Overview
//! This crate is the transport-agnostic half of the UniFi Network API
//! client: it classifies failures, retries the retryable ones, decodes
//! response envelopes, and walks paginated collections sequentially,
//! lazily, or concurrently. Actual HTTP lives behind the
//! [`Transport`] trait and is supplied by the embedder.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod envelope;
pub mod error;
pub mod executor;
pub mod page;
pub mod retry;
pub mod telemetry;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use envelope::PageEnvelope;
pub use envelope::decode_error;
pub use envelope::decode_json;
pub use envelope::decode_page;
pub use error::ApiClientError;
pub use error::RetryClass;
pub use executor::DEFAULT_CONCURRENCY;
pub use executor::Executor;
pub use executor::PageIter;
pub use page::PageBounds;
pub use page::PagedQuery;
pub use retry::Backoff;
pub use retry::Idempotency;
pub use retry::RetryPolicy;
pub use retry::Sleeper;
pub use retry::ThreadSleeper;
pub use telemetry::NoopTelemetry;
pub use telemetry::PageFetchEvent;
pub use telemetry::RetryAttemptEvent;
pub use telemetry::TelemetrySink;
pub use transport::ApiRequest;
pub use transport::CancelToken;
pub use transport::Method;
pub use transport::RawResponse;
pub use transport::Transport;
pub use transport::TransportFailure;
pub use transport::TransportFailureKind;
