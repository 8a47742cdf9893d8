// crates/unifi-network-api/src/actions.rs
// ============================================================================
// Module: Action Requests
// Description: Mutating request bodies and their parameter bounds.
// Purpose: Validate action parameters before any network call is made.
// Dependencies: serde, unifi-network-core
// ============================================================================

//! ## Overview
//! Every mutating endpoint takes a typed request body with an `action`
//! discriminator. Parameter bounds mirror what the controller enforces, and
//! they are checked at construction so an out-of-range request fails as
//! [`ApiClientError::InvalidRequest`] without consuming network attempts.
//!
//! All bodies serialize with `None` fields omitted; the controller rejects
//! explicit nulls on some firmware versions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::RangeInclusive;

use serde::Serialize;
use unifi_network_core::ApiClientError;

// ============================================================================
// SECTION: Bounds
// ============================================================================

/// Accepted range for time limits, in minutes.
pub const TIME_LIMIT_MINUTES: RangeInclusive<u32> = 1 ..= 1_000_000;

/// Accepted range for data caps, in megabytes.
pub const DATA_USAGE_LIMIT_MBYTES: RangeInclusive<u32> = 1 ..= 1_048_576;

/// Accepted range for rate caps, in Kbps.
pub const RATE_LIMIT_KBPS: RangeInclusive<u32> = 2 ..= 100_000;

/// Accepted range for vouchers created per request.
pub const VOUCHER_COUNT: RangeInclusive<u32> = 1 ..= 1_000;

/// Checks a required parameter against its range.
fn check_range(
    name: &str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ApiClientError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ApiClientError::InvalidRequest {
            message: format!(
                "{name} must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        })
    }
}

/// Checks an optional parameter against its range.
fn check_optional_range(
    name: &str,
    value: Option<u32>,
    range: &RangeInclusive<u32>,
) -> Result<(), ApiClientError> {
    match value {
        Some(value) => check_range(name, value, range),
        None => Ok(()),
    }
}

// ============================================================================
// SECTION: Device Actions
// ============================================================================

/// Body of a device restart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceActionRequest {
    /// Action discriminator, always `RESTART`.
    action: &'static str,
}

impl DeviceActionRequest {
    /// Builds a restart request.
    #[must_use]
    pub const fn restart() -> Self {
        Self {
            action: "RESTART",
        }
    }
}

/// Body of a port power-cycle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortActionRequest {
    /// Action discriminator, always `POWER_CYCLE`.
    action: &'static str,
}

impl PortActionRequest {
    /// Builds a power-cycle request.
    #[must_use]
    pub const fn power_cycle() -> Self {
        Self {
            action: "POWER_CYCLE",
        }
    }
}

// ============================================================================
// SECTION: Guest Actions
// ============================================================================

/// Body of a guest authorization request.
///
/// # Invariants
/// - All limits have passed their range checks at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeGuestRequest {
    /// Action discriminator, always `AUTHORIZE_GUEST_ACCESS`.
    action: &'static str,
    /// Access duration in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    time_limit_minutes: Option<u32>,
    /// Data cap in megabytes.
    #[serde(rename = "dataUsageLimitMBytes", skip_serializing_if = "Option::is_none")]
    data_usage_limit_mbytes: Option<u32>,
    /// Download rate cap in Kbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    rx_rate_limit_kbps: Option<u32>,
    /// Upload rate cap in Kbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_rate_limit_kbps: Option<u32>,
}

impl AuthorizeGuestRequest {
    /// Builds an authorization with no limits.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            action: "AUTHORIZE_GUEST_ACCESS",
            time_limit_minutes: None,
            data_usage_limit_mbytes: None,
            rx_rate_limit_kbps: None,
            tx_rate_limit_kbps: None,
        }
    }

    /// Builds an authorization with the given optional limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidRequest`] when any limit is outside
    /// its accepted range.
    pub fn with_limits(
        time_limit_minutes: Option<u32>,
        data_usage_limit_mbytes: Option<u32>,
        rx_rate_limit_kbps: Option<u32>,
        tx_rate_limit_kbps: Option<u32>,
    ) -> Result<Self, ApiClientError> {
        check_optional_range("time_limit_minutes", time_limit_minutes, &TIME_LIMIT_MINUTES)?;
        check_optional_range(
            "data_usage_limit_mbytes",
            data_usage_limit_mbytes,
            &DATA_USAGE_LIMIT_MBYTES,
        )?;
        check_optional_range("rx_rate_limit_kbps", rx_rate_limit_kbps, &RATE_LIMIT_KBPS)?;
        check_optional_range("tx_rate_limit_kbps", tx_rate_limit_kbps, &RATE_LIMIT_KBPS)?;
        Ok(Self {
            action: "AUTHORIZE_GUEST_ACCESS",
            time_limit_minutes,
            data_usage_limit_mbytes,
            rx_rate_limit_kbps,
            tx_rate_limit_kbps,
        })
    }
}

/// Body of a guest deauthorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnauthorizeGuestRequest {
    /// Action discriminator, always `UNAUTHORIZE_GUEST_ACCESS`.
    action: &'static str,
}

impl UnauthorizeGuestRequest {
    /// Builds a deauthorization request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            action: "UNAUTHORIZE_GUEST_ACCESS",
        }
    }
}

impl Default for UnauthorizeGuestRequest {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SECTION: Voucher Creation
// ============================================================================

/// Body of a voucher creation request.
///
/// # Invariants
/// - All parameters have passed their range checks at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherRequest {
    /// Number of vouchers to create.
    count: u32,
    /// Voucher note.
    name: String,
    /// Guests allowed per voucher.
    authorized_guest_limit: u32,
    /// Access duration per guest, in minutes.
    time_limit_minutes: u32,
    /// Data cap in megabytes.
    #[serde(rename = "dataUsageLimitMBytes", skip_serializing_if = "Option::is_none")]
    data_usage_limit_mbytes: Option<u32>,
    /// Download rate cap in Kbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    rx_rate_limit_kbps: Option<u32>,
    /// Upload rate cap in Kbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_rate_limit_kbps: Option<u32>,
}

/// Builder for [`CreateVoucherRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherSpec {
    /// Voucher note.
    name: String,
    /// Access duration per guest, in minutes.
    time_limit_minutes: u32,
    /// Number of vouchers to create.
    count: u32,
    /// Guests allowed per voucher.
    authorized_guest_limit: u32,
    /// Data cap in megabytes.
    data_usage_limit_mbytes: Option<u32>,
    /// Download rate cap in Kbps.
    rx_rate_limit_kbps: Option<u32>,
    /// Upload rate cap in Kbps.
    tx_rate_limit_kbps: Option<u32>,
}

impl VoucherSpec {
    /// Starts a spec with the required note and time limit; one voucher for
    /// one guest by default.
    #[must_use]
    pub fn new(name: impl Into<String>, time_limit_minutes: u32) -> Self {
        Self {
            name: name.into(),
            time_limit_minutes,
            count: 1,
            authorized_guest_limit: 1,
            data_usage_limit_mbytes: None,
            rx_rate_limit_kbps: None,
            tx_rate_limit_kbps: None,
        }
    }

    /// Sets how many vouchers to create.
    #[must_use]
    pub const fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets how many guests each voucher admits.
    #[must_use]
    pub const fn authorized_guest_limit(mut self, limit: u32) -> Self {
        self.authorized_guest_limit = limit;
        self
    }

    /// Sets a data cap in megabytes.
    #[must_use]
    pub const fn data_usage_limit_mbytes(mut self, limit: u32) -> Self {
        self.data_usage_limit_mbytes = Some(limit);
        self
    }

    /// Sets a download rate cap in Kbps.
    #[must_use]
    pub const fn rx_rate_limit_kbps(mut self, limit: u32) -> Self {
        self.rx_rate_limit_kbps = Some(limit);
        self
    }

    /// Sets an upload rate cap in Kbps.
    #[must_use]
    pub const fn tx_rate_limit_kbps(mut self, limit: u32) -> Self {
        self.tx_rate_limit_kbps = Some(limit);
        self
    }

    /// Checks every bound and produces the request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidRequest`] when any parameter is
    /// outside its accepted range.
    pub fn build(self) -> Result<CreateVoucherRequest, ApiClientError> {
        check_range("time_limit_minutes", self.time_limit_minutes, &TIME_LIMIT_MINUTES)?;
        check_range("count", self.count, &VOUCHER_COUNT)?;
        if self.authorized_guest_limit < 1 {
            return Err(ApiClientError::InvalidRequest {
                message: "authorized_guest_limit must be at least 1".to_owned(),
            });
        }
        check_optional_range(
            "data_usage_limit_mbytes",
            self.data_usage_limit_mbytes,
            &DATA_USAGE_LIMIT_MBYTES,
        )?;
        check_optional_range("rx_rate_limit_kbps", self.rx_rate_limit_kbps, &RATE_LIMIT_KBPS)?;
        check_optional_range("tx_rate_limit_kbps", self.tx_rate_limit_kbps, &RATE_LIMIT_KBPS)?;
        Ok(CreateVoucherRequest {
            count: self.count,
            name: self.name,
            authorized_guest_limit: self.authorized_guest_limit,
            time_limit_minutes: self.time_limit_minutes,
            data_usage_limit_mbytes: self.data_usage_limit_mbytes,
            rx_rate_limit_kbps: self.rx_rate_limit_kbps,
            tx_rate_limit_kbps: self.tx_rate_limit_kbps,
        })
    }
}
