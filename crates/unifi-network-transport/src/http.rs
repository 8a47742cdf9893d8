// crates/unifi-network-transport/src/http.rs
// ============================================================================
// Module: Blocking HTTP Transport
// Description: reqwest-backed implementation of the transport capability.
// Purpose: Carry authenticated requests to a UniFi Network controller with
//          strict limits.
// Dependencies: reqwest, unifi-network-core, url
// ============================================================================

//! ## Overview
//! The transport owns everything the core engine treats as opaque:
//! controller base-URL construction, the `X-API-KEY` header, TLS policy,
//! redirects disabled, request timeouts, and a response size limit.
//!
//! Controllers expose the integration API under
//! `/proxy/network/integration/v1`; callers configure only the controller
//! origin and the transport appends the prefix. Self-signed controller
//! certificates are common on local deployments, so certificate
//! verification can be disabled explicitly, never by default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::redirect::Policy;
use thiserror::Error;
use unifi_network_core::ApiRequest;
use unifi_network_core::Method;
use unifi_network_core::RawResponse;
use unifi_network_core::Transport;
use unifi_network_core::TransportFailure;
use unifi_network_core::TransportFailureKind;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path prefix of the Network Integration API on every controller.
pub const API_PREFIX: &str = "/proxy/network/integration/v1";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-API-KEY";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default cap on response body size, in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the blocking HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Controller origin, e.g. `https://192.168.1.1`.
    pub controller_url: String,
    /// API key issued by the controller.
    pub api_key: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Accept self-signed controller certificates.
    pub accept_invalid_certs: bool,
}

impl HttpTransportConfig {
    /// Builds a config with default timeout, size limit, and strict TLS.
    #[must_use]
    pub fn new(controller_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            controller_url: controller_url.into(),
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            accept_invalid_certs: false,
        }
    }
}

/// Errors raised while constructing the transport.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    /// The controller URL did not parse or used an unsupported scheme.
    #[error("invalid controller url: {message}")]
    InvalidControllerUrl {
        /// Description of the URL problem.
        message: String,
    },
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {message}")]
    ClientBuild {
        /// Description from the HTTP stack.
        message: String,
    },
}

// ============================================================================
// SECTION: Transport Implementation
// ============================================================================

/// Blocking HTTP transport for a single controller.
pub struct HttpTransport {
    /// Pooled HTTP client with timeout and TLS policy applied.
    client: Client,
    /// Fully joined API base URL, without a trailing slash.
    base_url: Url,
    /// API key sent on every request.
    api_key: String,
    /// Response size cap in bytes.
    max_response_bytes: usize,
}

impl HttpTransport {
    /// Constructs a transport for the configured controller.
    ///
    /// # Errors
    ///
    /// Returns [`TransportBuildError`] when the controller URL is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportBuildError> {
        let base_url = join_base_url(&config.controller_url)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|source| TransportBuildError::ClientBuild {
                message: source.to_string(),
            })?;
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Returns the joined API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative API path against the base URL.
    fn resolve(&self, path: &str) -> Result<Url, TransportFailure> {
        let joined = format!("{}{path}", self.base_url);
        Url::parse(&joined).map_err(|source| {
            TransportFailure::new(
                TransportFailureKind::Io,
                format!("request path {path:?} did not resolve: {source}"),
            )
        })
    }

    /// Builds the reqwest request for an API request.
    fn builder(&self, request: &ApiRequest, url: Url) -> RequestBuilder {
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        builder = builder
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        let url = self.resolve(&request.path)?;
        let response = self.builder(request, url).send().map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = read_limited(response, self.max_response_bytes)?;
        Ok(RawResponse {
            status,
            body,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses the controller origin and appends the integration API prefix.
fn join_base_url(controller_url: &str) -> Result<Url, TransportBuildError> {
    let trimmed = controller_url.trim_end_matches('/');
    let origin = Url::parse(trimmed).map_err(|source| TransportBuildError::InvalidControllerUrl {
        message: source.to_string(),
    })?;
    match origin.scheme() {
        "http" | "https" => {}
        other => {
            return Err(TransportBuildError::InvalidControllerUrl {
                message: format!("unsupported scheme {other:?}"),
            });
        }
    }
    if origin.host_str().is_none() {
        return Err(TransportBuildError::InvalidControllerUrl {
            message: "controller url has no host".to_owned(),
        });
    }
    let joined = format!("{trimmed}{API_PREFIX}");
    Url::parse(&joined).map_err(|source| TransportBuildError::InvalidControllerUrl {
        message: source.to_string(),
    })
}

/// Maps a reqwest error to a transport failure classification.
fn classify_reqwest_error(source: reqwest::Error) -> TransportFailure {
    let kind = if source.is_timeout() {
        TransportFailureKind::Timeout
    } else if source.is_connect() {
        TransportFailureKind::Connect
    } else {
        TransportFailureKind::Io
    };
    TransportFailure::new(kind, source.to_string())
}

/// Reads the response body while enforcing the size limit.
fn read_limited(
    response: reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, TransportFailure> {
    let max_bytes_u64 = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(TransportFailure::new(
            TransportFailureKind::Io,
            "response exceeds size limit",
        ));
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle.read_to_end(&mut buf).map_err(|source| {
        TransportFailure::new(TransportFailureKind::Io, format!("body read failed: {source}"))
    })?;
    if buf.len() > max_bytes {
        return Err(TransportFailure::new(
            TransportFailureKind::Io,
            "response exceeds size limit",
        ));
    }
    Ok(buf)
}
