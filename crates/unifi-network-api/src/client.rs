// crates/unifi-network-api/src/client.rs
// ============================================================================
// Module: Endpoint Surface
// Description: Site-scoped wrappers over every integration endpoint.
// Purpose: Pair each endpoint with its path, bounds, idempotency, and
//          response type.
// Dependencies: crate::{actions, models}, serde_json, unifi-network-core,
//              unifi-network-filter
// ============================================================================

//! ## Overview
//! [`NetworkApi`] wraps a core executor and exposes one method per
//! endpoint. List endpoints accept [`ListOptions`] carrying an optional
//! filter source string and page size; the filter is parsed, validated
//! against the resource's schema, and serialized before the first request
//! goes out. Mutating endpoints are marked non-idempotent so their
//! failures surface without retries.
//!
//! Large traversals that want lazy or concurrent fetching build a
//! [`PagedQuery`] via the `*_query` methods and drive it through
//! [`NetworkApi::executor`] directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use unifi_network_core::ApiClientError;
use unifi_network_core::ApiRequest;
use unifi_network_core::Executor;
use unifi_network_core::Idempotency;
use unifi_network_core::PageBounds;
use unifi_network_core::PagedQuery;
use unifi_network_core::decode_json;
use unifi_network_filter::ResourceKind;
use unifi_network_filter::parse_filter;
use unifi_network_filter::serialize_filter;
use unifi_network_filter::validate_filter;

use crate::actions::AuthorizeGuestRequest;
use crate::actions::DeviceActionRequest;
use crate::actions::PortActionRequest;
use crate::actions::UnauthorizeGuestRequest;
use crate::actions::VoucherSpec;
use crate::models::ApplicationInfo;
use crate::models::CreateVoucherResponse;
use crate::models::DeleteVoucherResponse;
use crate::models::Device;
use crate::models::DeviceDetails;
use crate::models::DeviceStatistics;
use crate::models::NetworkClient;
use crate::models::Site;
use crate::models::Voucher;

// ============================================================================
// SECTION: Filter Compilation
// ============================================================================

/// Compiles a filter source string for the given resource.
///
/// Runs the parse, schema-validate, and serialize stages in order; the
/// result is the canonical filter string sent as the `filter` query
/// parameter.
///
/// # Errors
///
/// Returns [`ApiClientError::Parse`] or [`ApiClientError::Validation`] from
/// the front stages, or [`ApiClientError::InvalidRequest`] when a directly
/// constructed literal cannot be rendered.
pub fn compile_filter(resource: ResourceKind, source: &str) -> Result<String, ApiClientError> {
    let expression = parse_filter(source)?;
    validate_filter(&expression, resource.schema())?;
    serialize_filter(&expression).map_err(|source| ApiClientError::InvalidRequest {
        message: source.to_string(),
    })
}

// ============================================================================
// SECTION: List Options
// ============================================================================

/// Caller-facing options for list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// Filter source string, compiled per resource before the request.
    filter: Option<String>,
    /// Explicit page size; `None` uses the endpoint default.
    limit: Option<u64>,
}

impl ListOptions {
    /// Options with no filter and the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a filter source string.
    #[must_use]
    pub fn with_filter(mut self, source: impl Into<String>) -> Self {
        self.filter = Some(source.into());
        self
    }

    /// Sets an explicit page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ============================================================================
// SECTION: API Surface
// ============================================================================

/// Site-scoped endpoint surface over a core executor.
pub struct NetworkApi<'a> {
    /// Executor carrying retry policy, telemetry, and cancellation.
    executor: Executor<'a>,
}

impl<'a> NetworkApi<'a> {
    /// Wraps an already configured executor.
    #[must_use]
    pub const fn new(executor: Executor<'a>) -> Self {
        Self {
            executor,
        }
    }

    /// Returns the underlying executor, for lazy or concurrent traversal.
    #[must_use]
    pub const fn executor(&self) -> &Executor<'a> {
        &self.executor
    }

    /// Builds a paged query for a resource's list endpoint.
    fn list_query(
        resource: ResourceKind,
        path: String,
        options: &ListOptions,
    ) -> Result<PagedQuery, ApiClientError> {
        let mut query = PagedQuery::new(path, PageBounds::for_resource(resource));
        if let Some(limit) = options.limit {
            query = query.with_limit(limit)?;
        }
        if let Some(source) = &options.filter {
            query = query.with_filter(compile_filter(resource, source)?);
        }
        Ok(query)
    }

    /// Sends a mutating request and discards any response body.
    fn post_action<B>(&self, path: String, body: &B) -> Result<(), ApiClientError>
    where
        B: Serialize,
    {
        let body = serde_json::to_value(body).map_err(|source| ApiClientError::InvalidRequest {
            message: format!("request body serialization failed: {source}"),
        })?;
        self.executor.execute(&ApiRequest::post(path, body), Idempotency::NonIdempotent)?;
        Ok(())
    }

    // ========================================================================
    // SECTION: Application
    // ========================================================================

    /// Fetches general information about the Network application.
    ///
    /// # Errors
    ///
    /// Returns any execution or decode failure.
    pub fn application_info(&self) -> Result<ApplicationInfo, ApiClientError> {
        let response =
            self.executor.execute(&ApiRequest::get("/info"), Idempotency::Idempotent)?;
        decode_json(&response.body)
    }

    // ========================================================================
    // SECTION: Sites
    // ========================================================================

    /// Builds a paged query over all sites.
    ///
    /// # Errors
    ///
    /// Returns filter compilation or limit validation failures.
    pub fn sites_query(&self, options: &ListOptions) -> Result<PagedQuery, ApiClientError> {
        Self::list_query(ResourceKind::Site, "/sites".to_owned(), options)
    }

    /// Lists every site.
    ///
    /// # Errors
    ///
    /// Returns any execution, decode, or filter compilation failure.
    pub fn list_sites(&self, options: &ListOptions) -> Result<Vec<Site>, ApiClientError> {
        self.executor.fetch_all(&self.sites_query(options)?)
    }

    // ========================================================================
    // SECTION: Devices
    // ========================================================================

    /// Builds a paged query over a site's devices.
    ///
    /// # Errors
    ///
    /// Returns filter compilation or limit validation failures.
    pub fn devices_query(
        &self,
        site_id: &str,
        options: &ListOptions,
    ) -> Result<PagedQuery, ApiClientError> {
        Self::list_query(ResourceKind::Device, format!("/sites/{site_id}/devices"), options)
    }

    /// Lists every adopted device on a site.
    ///
    /// # Errors
    ///
    /// Returns any execution, decode, or filter compilation failure.
    pub fn list_devices(
        &self,
        site_id: &str,
        options: &ListOptions,
    ) -> Result<Vec<Device>, ApiClientError> {
        self.executor.fetch_all(&self.devices_query(site_id, options)?)
    }

    /// Fetches full detail for one device.
    ///
    /// # Errors
    ///
    /// Returns any execution or decode failure.
    pub fn get_device(
        &self,
        site_id: &str,
        device_id: &str,
    ) -> Result<DeviceDetails, ApiClientError> {
        let request = ApiRequest::get(format!("/sites/{site_id}/devices/{device_id}"));
        let response = self.executor.execute(&request, Idempotency::Idempotent)?;
        decode_json(&response.body)
    }

    /// Fetches the latest statistics snapshot for one device.
    ///
    /// # Errors
    ///
    /// Returns any execution or decode failure.
    pub fn get_device_statistics(
        &self,
        site_id: &str,
        device_id: &str,
    ) -> Result<DeviceStatistics, ApiClientError> {
        let request = ApiRequest::get(format!(
            "/sites/{site_id}/devices/{device_id}/statistics/latest"
        ));
        let response = self.executor.execute(&request, Idempotency::Idempotent)?;
        decode_json(&response.body)
    }

    /// Restarts a device.
    ///
    /// # Errors
    ///
    /// Returns any execution failure; never retried.
    pub fn restart_device(&self, site_id: &str, device_id: &str) -> Result<(), ApiClientError> {
        self.post_action(
            format!("/sites/{site_id}/devices/{device_id}/actions"),
            &DeviceActionRequest::restart(),
        )
    }

    /// Power-cycles a PoE port on a device.
    ///
    /// # Errors
    ///
    /// Returns any execution failure; never retried.
    pub fn power_cycle_port(
        &self,
        site_id: &str,
        device_id: &str,
        port_idx: u32,
    ) -> Result<(), ApiClientError> {
        self.post_action(
            format!("/sites/{site_id}/devices/{device_id}/interfaces/ports/{port_idx}/actions"),
            &PortActionRequest::power_cycle(),
        )
    }

    // ========================================================================
    // SECTION: Clients
    // ========================================================================

    /// Builds a paged query over a site's connected clients.
    ///
    /// # Errors
    ///
    /// Returns filter compilation or limit validation failures.
    pub fn clients_query(
        &self,
        site_id: &str,
        options: &ListOptions,
    ) -> Result<PagedQuery, ApiClientError> {
        Self::list_query(ResourceKind::Client, format!("/sites/{site_id}/clients"), options)
    }

    /// Lists every connected client on a site.
    ///
    /// # Errors
    ///
    /// Returns any execution, decode, or filter compilation failure.
    pub fn list_clients(
        &self,
        site_id: &str,
        options: &ListOptions,
    ) -> Result<Vec<NetworkClient>, ApiClientError> {
        self.executor.fetch_all(&self.clients_query(site_id, options)?)
    }

    /// Fetches one connected client.
    ///
    /// # Errors
    ///
    /// Returns any execution or decode failure.
    pub fn get_client(
        &self,
        site_id: &str,
        client_id: &str,
    ) -> Result<NetworkClient, ApiClientError> {
        let request = ApiRequest::get(format!("/sites/{site_id}/clients/{client_id}"));
        let response = self.executor.execute(&request, Idempotency::Idempotent)?;
        decode_json(&response.body)
    }

    /// Grants guest access to a client.
    ///
    /// # Errors
    ///
    /// Returns any execution failure; never retried.
    pub fn authorize_guest(
        &self,
        site_id: &str,
        client_id: &str,
        request: &AuthorizeGuestRequest,
    ) -> Result<(), ApiClientError> {
        self.post_action(format!("/sites/{site_id}/clients/{client_id}/actions"), request)
    }

    /// Revokes a client's guest access.
    ///
    /// # Errors
    ///
    /// Returns any execution failure; never retried.
    pub fn unauthorize_guest(&self, site_id: &str, client_id: &str) -> Result<(), ApiClientError> {
        self.post_action(
            format!("/sites/{site_id}/clients/{client_id}/actions"),
            &UnauthorizeGuestRequest::new(),
        )
    }

    // ========================================================================
    // SECTION: Vouchers
    // ========================================================================

    /// Builds a paged query over a site's hotspot vouchers.
    ///
    /// # Errors
    ///
    /// Returns filter compilation or limit validation failures.
    pub fn vouchers_query(
        &self,
        site_id: &str,
        options: &ListOptions,
    ) -> Result<PagedQuery, ApiClientError> {
        Self::list_query(
            ResourceKind::Voucher,
            format!("/sites/{site_id}/hotspot/vouchers"),
            options,
        )
    }

    /// Lists every hotspot voucher on a site.
    ///
    /// # Errors
    ///
    /// Returns any execution, decode, or filter compilation failure.
    pub fn list_vouchers(
        &self,
        site_id: &str,
        options: &ListOptions,
    ) -> Result<Vec<Voucher>, ApiClientError> {
        self.executor.fetch_all(&self.vouchers_query(site_id, options)?)
    }

    /// Creates one or more hotspot vouchers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidRequest`] when the spec violates a
    /// bound, or any execution or decode failure; never retried.
    pub fn create_vouchers(
        &self,
        site_id: &str,
        spec: VoucherSpec,
    ) -> Result<CreateVoucherResponse, ApiClientError> {
        let request_body = spec.build()?;
        let body = serde_json::to_value(&request_body).map_err(|source| {
            ApiClientError::InvalidRequest {
                message: format!("request body serialization failed: {source}"),
            }
        })?;
        let request = ApiRequest::post(format!("/sites/{site_id}/hotspot/vouchers"), body);
        let response = self.executor.execute(&request, Idempotency::NonIdempotent)?;
        decode_json(&response.body)
    }

    /// Deletes one hotspot voucher.
    ///
    /// Some controller versions answer with an empty body; those report
    /// `None` instead of a deletion count.
    ///
    /// # Errors
    ///
    /// Returns any execution or decode failure; never retried.
    pub fn delete_voucher(
        &self,
        site_id: &str,
        voucher_id: &str,
    ) -> Result<Option<DeleteVoucherResponse>, ApiClientError> {
        let request = ApiRequest::delete(format!("/sites/{site_id}/hotspot/vouchers/{voucher_id}"));
        let response = self.executor.execute(&request, Idempotency::NonIdempotent)?;
        if response.body.is_empty() {
            return Ok(None);
        }
        decode_json::<DeleteVoucherResponse>(&response.body).map(Some)
    }
}
