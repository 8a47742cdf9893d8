// crates/unifi-network-core/tests/support/mocks.rs
// ============================================================================
// Module: Executor Mocks
// Description: Scripted transports, recording sleepers, and telemetry sinks.
// ============================================================================
//! ## Overview
//! Deterministic stand-ins for the executor's seams: a transport that
//! replays a script in order, a transport that serves pages keyed by
//! offset for concurrent fetching, a sleeper that records requested
//! delays, and a telemetry sink that collects events.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use serde_json::json;
use unifi_network_core::ApiRequest;
use unifi_network_core::PageFetchEvent;
use unifi_network_core::RawResponse;
use unifi_network_core::RetryAttemptEvent;
use unifi_network_core::Sleeper;
use unifi_network_core::TelemetrySink;
use unifi_network_core::Transport;
use unifi_network_core::TransportFailure;
use unifi_network_core::TransportFailureKind;

// ========================================================================
// Response Builders
// ========================================================================

/// Builds a raw response with a JSON body.
pub fn json_response(status: u16, body: &Value) -> RawResponse {
    RawResponse {
        status,
        body: body.to_string().into_bytes(),
    }
}

/// Builds a pagination envelope body whose items are integers.
pub fn page_body(offset: u64, limit: u64, total_count: u64, items: &[i64]) -> Value {
    json!({
        "offset": offset,
        "limit": limit,
        "count": items.len(),
        "totalCount": total_count,
        "data": items,
    })
}

// ========================================================================
// Scripted Transport
// ========================================================================

/// Transport that replays a fixed script of outcomes in order.
///
/// Every incoming request is recorded; once the script is exhausted,
/// further sends fail with an I/O transport failure.
pub struct ScriptedTransport {
    /// Remaining scripted outcomes, consumed front to back.
    script: Mutex<VecDeque<Result<RawResponse, TransportFailure>>>,
    /// Every request seen, in arrival order.
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport that will replay the given outcomes.
    pub fn new(script: Vec<Result<RawResponse, TransportFailure>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every request received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns how many requests have been received.
    pub fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportFailure::new(TransportFailureKind::Io, "script exhausted"))
        })
    }
}

// ========================================================================
// Paged Transport
// ========================================================================

/// Transport that serves pagination responses keyed by requested offset.
///
/// Lookup order is irrelevant, which makes this suitable for concurrent
/// fetch tests where worker scheduling is nondeterministic.
pub struct PagedTransport {
    /// Response for each offset a page request may carry.
    pages: HashMap<u64, RawResponse>,
    /// Every request seen, in arrival order.
    requests: Mutex<Vec<ApiRequest>>,
}

impl PagedTransport {
    /// Creates a transport serving the given offset-to-response map.
    pub fn new(pages: HashMap<u64, RawResponse>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns how many requests have been received.
    pub fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for PagedTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request.clone());
        let offset = request
            .query
            .iter()
            .find(|(key, _)| key == "offset")
            .and_then(|(_, value)| value.parse::<u64>().ok());
        match offset.and_then(|offset| self.pages.get(&offset)) {
            Some(response) => Ok(response.clone()),
            None => Err(TransportFailure::new(
                TransportFailureKind::Connect,
                format!("no page scripted at offset {offset:?}"),
            )),
        }
    }
}

// ========================================================================
// Recording Seams
// ========================================================================

/// Sleeper that records requested delays instead of sleeping.
#[derive(Default)]
pub struct CountingSleeper {
    /// Delays requested so far, in order.
    delays: Mutex<Vec<Duration>>,
}

impl CountingSleeper {
    /// Returns a copy of the delays requested so far.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Telemetry sink that collects every event it receives.
#[derive(Default)]
pub struct RecordingTelemetry {
    /// Retry events in arrival order.
    retries: Mutex<Vec<RetryAttemptEvent>>,
    /// Page-fetch events in arrival order.
    pages: Mutex<Vec<PageFetchEvent>>,
}

impl RecordingTelemetry {
    /// Returns a copy of the retry events received so far.
    pub fn retries(&self) -> Vec<RetryAttemptEvent> {
        self.retries.lock().unwrap().clone()
    }

    /// Returns a copy of the page-fetch events received so far.
    pub fn pages(&self) -> Vec<PageFetchEvent> {
        self.pages.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn retry_attempt(&self, event: RetryAttemptEvent) {
        self.retries.lock().unwrap().push(event);
    }

    fn page_fetched(&self, event: PageFetchEvent) {
        self.pages.lock().unwrap().push(event);
    }
}
