// crates/unifi-network-api/tests/support/mocks.rs
// ============================================================================
// Module: Endpoint Mocks
// Description: Scripted transport and response builders for endpoint tests.
// ============================================================================
//! ## Overview
//! A transport that replays scripted responses in order while recording
//! every request, plus builders for pagination envelopes around model
//! fixtures.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;
use serde_json::json;
use unifi_network_core::ApiRequest;
use unifi_network_core::RawResponse;
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

/// Builds a raw response with no body at all.
pub fn empty_response(status: u16) -> RawResponse {
    RawResponse {
        status,
        body: Vec::new(),
    }
}

/// Wraps items in a single complete pagination envelope.
pub fn single_page(items: &[Value]) -> Value {
    json!({
        "offset": 0,
        "limit": items.len(),
        "count": items.len(),
        "totalCount": items.len(),
        "data": items,
    })
}

// ========================================================================
// Scripted Transport
// ========================================================================

/// Transport that replays scripted responses in order.
pub struct ScriptedTransport {
    /// Remaining scripted responses, consumed front to back.
    script: Mutex<VecDeque<RawResponse>>,
    /// Every request seen, in arrival order.
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport that will replay the given responses.
    pub fn new(script: Vec<RawResponse>) -> Self {
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
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportFailure::new(TransportFailureKind::Io, "script exhausted"))
    }
}
