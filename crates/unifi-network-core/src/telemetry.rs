// crates/unifi-network-core/src/telemetry.rs
// ============================================================================
// Module: Executor Telemetry
// Description: Structured observation points for retries and page fetches.
// Purpose: Let embedders observe executor behavior without imposing a
//          logging framework on them.
// Dependencies: std::time
// ============================================================================

//! ## Overview
//! The executor reports two kinds of events: a retry being scheduled after a
//! retryable failure, and a page fetch completing. Sinks receive owned event
//! structs; the default sink discards them. Sink methods must not block the
//! executor for long, since they run on the fetching thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Events
// ============================================================================

/// A retryable failure occurred and another attempt is scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryAttemptEvent {
    /// Method and path of the request being retried.
    pub request: String,
    /// The attempt that just failed (1-based).
    pub attempt: u32,
    /// Total attempt budget.
    pub max_attempts: u32,
    /// Stable label of the observed failure.
    pub error_kind: &'static str,
    /// Delay before the next attempt.
    pub delay: Duration,
}

/// One page fetch completed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetchEvent {
    /// Request path of the list endpoint.
    pub path: String,
    /// Offset of the fetched page.
    pub offset: u64,
    /// Items in the fetched page.
    pub count: u64,
    /// Collection size the server reported at fetch time.
    pub total_count: u64,
}

// ============================================================================
// SECTION: Sink
// ============================================================================

/// Receives executor telemetry events.
///
/// All methods default to no-ops so sinks implement only what they observe.
pub trait TelemetrySink: Send + Sync {
    /// Called when a retry is scheduled after a retryable failure.
    fn retry_attempt(&self, event: RetryAttemptEvent) {
        let _ = event;
    }

    /// Called after each successful page fetch.
    fn page_fetched(&self, event: PageFetchEvent) {
        let _ = event;
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {}
