// crates/unifi-network-core/src/page.rs
// ============================================================================
// Module: Pagination Parameters
// Description: Per-resource page-size bounds and paged-query construction.
// Purpose: Validate caller-supplied limits and build per-page requests.
// Dependencies: crate::{error, transport}, unifi-network-filter
// ============================================================================

//! ## Overview
//! Each list endpoint carries page-size bounds: a default limit applied when
//! the caller supplies none, and a maximum the controller enforces. Most
//! endpoints default to 25 with a cap of 200; the voucher endpoint defaults
//! to 100 with a cap of 1000.
//!
//! A [`PagedQuery`] pairs an endpoint path with its bounds, an optional
//! serialized filter, and a starting offset, and stamps out the per-page
//! [`ApiRequest`]s the executor sends.

// ============================================================================
// SECTION: Imports
// ============================================================================

use unifi_network_filter::ResourceKind;

use crate::error::ApiClientError;
use crate::transport::ApiRequest;

// ============================================================================
// SECTION: Bounds
// ============================================================================

/// Page-size bounds for one list endpoint.
///
/// # Invariants
/// - `default_limit <= max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Limit applied when the caller supplies none.
    pub default_limit: u64,
    /// Largest limit the controller accepts.
    pub max_limit: u64,
    /// Whether a limit of zero is accepted (no current endpoint allows it).
    pub zero_limit: bool,
}

impl PageBounds {
    /// Bounds shared by most list endpoints.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            default_limit: 25,
            max_limit: 200,
            zero_limit: false,
        }
    }

    /// Bounds for the voucher endpoint.
    #[must_use]
    pub const fn vouchers() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
            zero_limit: false,
        }
    }

    /// Returns the bounds for a resource's list endpoint.
    #[must_use]
    pub const fn for_resource(resource: ResourceKind) -> Self {
        match resource {
            ResourceKind::Voucher => Self::vouchers(),
            ResourceKind::Site | ResourceKind::Device | ResourceKind::Client => Self::standard(),
        }
    }

    /// Validates a caller-supplied limit against these bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidRequest`] when the limit is zero
    /// (unless the endpoint allows it) or exceeds `max_limit`.
    pub fn validate_limit(&self, limit: u64) -> Result<(), ApiClientError> {
        if limit == 0 && !self.zero_limit {
            return Err(ApiClientError::InvalidRequest {
                message: "page limit must be at least 1".to_owned(),
            });
        }
        if limit > self.max_limit {
            return Err(ApiClientError::InvalidRequest {
                message: format!("page limit {limit} exceeds maximum {}", self.max_limit),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Paged Queries
// ============================================================================

/// A list-endpoint query the executor paginates over.
///
/// # Invariants
/// - `limit`, when set, has already passed [`PageBounds::validate_limit`].
/// - `filter`, when set, is an already-serialized filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedQuery {
    /// Endpoint path relative to the API base URL.
    path: String,
    /// Page-size bounds for this endpoint.
    bounds: PageBounds,
    /// Caller-chosen page size, or `None` for the endpoint default.
    limit: Option<u64>,
    /// Serialized filter expression.
    filter: Option<String>,
    /// Offset of the first page.
    start_offset: u64,
}

impl PagedQuery {
    /// Builds a query over the given endpoint with its bounds.
    #[must_use]
    pub fn new(path: impl Into<String>, bounds: PageBounds) -> Self {
        Self {
            path: path.into(),
            bounds,
            limit: None,
            filter: None,
            start_offset: 0,
        }
    }

    /// Sets an explicit page size.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidRequest`] when the limit violates
    /// the endpoint's bounds.
    pub fn with_limit(mut self, limit: u64) -> Result<Self, ApiClientError> {
        self.bounds.validate_limit(limit)?;
        self.limit = Some(limit);
        Ok(self)
    }

    /// Attaches an already-serialized filter string.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Starts the traversal at the given offset instead of zero.
    #[must_use]
    pub const fn with_start_offset(mut self, offset: u64) -> Self {
        self.start_offset = offset;
        self
    }

    /// Returns the endpoint path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the effective page size.
    #[must_use]
    pub fn effective_limit(&self) -> u64 {
        self.limit.unwrap_or(self.bounds.default_limit)
    }

    /// Returns the offset of the first page.
    #[must_use]
    pub const fn start_offset(&self) -> u64 {
        self.start_offset
    }

    /// Builds the request for the page at the given offset.
    #[must_use]
    pub fn page_request(&self, offset: u64) -> ApiRequest {
        let mut request = ApiRequest::get(self.path.clone())
            .with_query("offset", offset.to_string())
            .with_query("limit", self.effective_limit().to_string());
        if let Some(filter) = &self.filter {
            request = request.with_query("filter", filter.clone());
        }
        request
    }
}
