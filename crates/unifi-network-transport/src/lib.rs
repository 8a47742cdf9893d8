// crates/unifi-network-transport/src/lib.rs
// ============================================================================
// Module: Transport Root
// Description: Public API surface for the blocking HTTP transport.
// Purpose: Expose the reqwest-backed implementation of the core transport
//          capability.
// Dependencies: crate::http
// ============================================================================

//! ## Overview
//! This crate supplies the one concrete [`unifi_network_core::Transport`]
//! implementation: a blocking, rustls-backed HTTP client that handles
//! authentication, base-URL construction, TLS policy, and response size
//! limits for a single UniFi Network controller.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::API_PREFIX;
pub use http::DEFAULT_MAX_RESPONSE_BYTES;
pub use http::DEFAULT_TIMEOUT_MS;
pub use http::HttpTransport;
pub use http::HttpTransportConfig;
pub use http::TransportBuildError;
