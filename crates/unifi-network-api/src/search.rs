// crates/unifi-network-api/src/search.rs
// ============================================================================
// Module: Device Search
// Description: Client-side device filtering with wildcard name patterns.
// Purpose: Narrow a device listing by name pattern, model, and state.
// Dependencies: crate::{client, models}, unifi-network-core,
//              unifi-network-filter
// ============================================================================

//! ## Overview
//! Device search runs client-side: the full device list is fetched and then
//! filtered locally. Name patterns use the wildcard language (`*` for any
//! run, `.` for one character, `\` to escape) with anchored,
//! case-insensitive matching; model and state criteria are exact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use unifi_network_core::ApiClientError;
use unifi_network_filter::wildcard_match;

use crate::client::ListOptions;
use crate::client::NetworkApi;
use crate::models::Device;
use crate::models::DeviceState;

// ============================================================================
// SECTION: Criteria
// ============================================================================

/// Client-side device search criteria.
///
/// Criteria combine conjunctively; an empty search matches every device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceSearch {
    /// Wildcard pattern matched against device names.
    name_pattern: Option<String>,
    /// Exact model identifier to match.
    model: Option<String>,
    /// Device state to match.
    state: Option<DeviceState>,
}

impl DeviceSearch {
    /// Search matching every device.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches device names against a wildcard pattern.
    #[must_use]
    pub fn with_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    /// Matches an exact model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Matches a device state.
    #[must_use]
    pub const fn with_state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Tests one device against all criteria.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidRequest`] when the name pattern is
    /// malformed.
    pub fn matches(&self, device: &Device) -> Result<bool, ApiClientError> {
        if let Some(pattern) = &self.name_pattern {
            let matched = wildcard_match(pattern, &device.name).map_err(|source| {
                ApiClientError::InvalidRequest {
                    message: format!("name pattern: {source}"),
                }
            })?;
            if !matched {
                return Ok(false);
            }
        }
        if let Some(model) = &self.model
            && device.model != *model
        {
            return Ok(false);
        }
        if let Some(state) = self.state
            && device.state != state
        {
            return Ok(false);
        }
        Ok(true)
    }
}

// ============================================================================
// SECTION: Search Endpoint
// ============================================================================

impl NetworkApi<'_> {
    /// Searches a site's devices against the given criteria.
    ///
    /// # Errors
    ///
    /// Returns any execution or decode failure, or
    /// [`ApiClientError::InvalidRequest`] when the name pattern is
    /// malformed.
    pub fn search_devices(
        &self,
        site_id: &str,
        search: &DeviceSearch,
    ) -> Result<Vec<Device>, ApiClientError> {
        let devices = self.list_devices(site_id, &ListOptions::new())?;
        let mut matched = Vec::new();
        for device in devices {
            if search.matches(&device)? {
                matched.push(device);
            }
        }
        Ok(matched)
    }
}
