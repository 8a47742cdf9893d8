// crates/unifi-network-api/src/models.rs
// ============================================================================
// Module: Resource Models
// Description: Typed representations of API resources.
// Purpose: Deserialize controller responses into strongly typed values.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Resource models mirror the wire shapes of the Network Integration API.
//! Field names follow Rust conventions and map to the API's camelCase via
//! serde renaming; timestamps are RFC 3339 strings on the wire and
//! [`OffsetDateTime`] here.
//!
//! Clients are the one polymorphic resource: the `type` discriminator
//! selects wired, wireless, VPN, or teleport shapes, so [`NetworkClient`]
//! is an internally tagged enum.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Application
// ============================================================================

/// General information about the Network application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    /// Application version string.
    pub application_version: String,
}

// ============================================================================
// SECTION: Sites
// ============================================================================

/// A site managed by the Network application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site UUID.
    pub id: String,
    /// Internal reference, when set.
    #[serde(default)]
    pub internal_reference: Option<String>,
    /// Human-readable site name.
    pub name: String,
}

// ============================================================================
// SECTION: Devices
// ============================================================================

/// Adoption and connectivity state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceState {
    /// Adopted and reachable.
    Online,
    /// Adopted but unreachable.
    Offline,
    /// Waiting for adoption.
    Pending,
    /// Lost connection to the controller.
    Disconnected,
    /// Firmware upgrade in progress.
    Upgrading,
    /// Configuration push in progress.
    Provisioning,
    /// Missed its heartbeat window.
    HeartbeatMissed,
    /// Isolated from the network.
    Isolated,
}

impl DeviceState {
    /// Returns the wire-form state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
            Self::Pending => "PENDING",
            Self::Disconnected => "DISCONNECTED",
            Self::Upgrading => "UPGRADING",
            Self::Provisioning => "PROVISIONING",
            Self::HeartbeatMissed => "HEARTBEAT_MISSED",
            Self::Isolated => "ISOLATED",
        }
    }
}

/// Link state of a physical port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortState {
    /// Link established.
    Up,
    /// No link.
    Down,
}

/// Physical connector of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PortConnector {
    /// Copper RJ45.
    #[serde(rename = "RJ45")]
    Rj45,
    /// SFP cage.
    #[serde(rename = "SFP")]
    Sfp,
    /// SFP+ cage.
    #[serde(rename = "SFP+")]
    SfpPlus,
}

/// Power-over-Ethernet standard supported by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PoeStandard {
    /// IEEE 802.3af.
    #[serde(rename = "802.3af")]
    Af,
    /// IEEE 802.3at.
    #[serde(rename = "802.3at")]
    At,
    /// IEEE 802.3bt.
    #[serde(rename = "802.3bt")]
    Bt,
    /// Passive (non-standard) PoE.
    #[serde(rename = "passive")]
    Passive,
}

/// PoE delivery status of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoeInfo {
    /// Supported PoE standard.
    pub standard: PoeStandard,
    /// PoE type number.
    #[serde(rename = "type")]
    pub poe_type: u8,
    /// Whether PoE is enabled on the port.
    pub enabled: bool,
    /// Delivery state.
    pub state: PortState,
}

/// A physical port on a device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// One-based port index.
    pub idx: u32,
    /// Link state.
    pub state: PortState,
    /// Physical connector type.
    pub connector: PortConnector,
    /// Maximum negotiable speed in Mbps.
    pub max_speed_mbps: u32,
    /// Currently negotiated speed in Mbps.
    #[serde(default)]
    pub speed_mbps: Option<u32>,
    /// PoE status, when the port supports it.
    #[serde(default)]
    pub poe: Option<PoeInfo>,
}

/// WLAN standard of a radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum WlanStandard {
    /// IEEE 802.11a.
    #[serde(rename = "802.11a")]
    A,
    /// IEEE 802.11b.
    #[serde(rename = "802.11b")]
    B,
    /// IEEE 802.11g.
    #[serde(rename = "802.11g")]
    G,
    /// IEEE 802.11n.
    #[serde(rename = "802.11n")]
    N,
    /// IEEE 802.11ac.
    #[serde(rename = "802.11ac")]
    Ac,
    /// IEEE 802.11ax.
    #[serde(rename = "802.11ax")]
    Ax,
}

/// A radio on an access point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radio {
    /// Most capable WLAN standard.
    pub wlan_standard: WlanStandard,
    /// Frequency band in GHz.
    #[serde(rename = "frequencyGHz")]
    pub frequency_ghz: f64,
    /// Channel width in MHz.
    #[serde(rename = "channelWidthMHz")]
    pub channel_width_mhz: u32,
    /// Assigned channel, when provisioned.
    #[serde(default)]
    pub channel: Option<u32>,
}

/// Ports and radios exposed by a device.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInterfaces {
    /// Physical ports, for switching-capable devices.
    #[serde(default)]
    pub ports: Option<Vec<Port>>,
    /// Radios, for access points.
    #[serde(default)]
    pub radios: Option<Vec<Radio>>,
}

/// Feature blocks exposed by a device.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFeatures {
    /// Switching capability details.
    #[serde(default)]
    pub switching: Option<Value>,
    /// Access-point capability details.
    #[serde(default)]
    pub access_point: Option<Value>,
}

/// Uplink of a device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUplink {
    /// UUID of the upstream device.
    pub device_id: String,
}

/// An adopted device as returned by list endpoints.
///
/// List responses encode `features` and `interfaces` either as name arrays
/// or as nested objects depending on controller version, so both stay
/// untyped here; [`DeviceDetails`] carries the typed forms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Device UUID.
    pub id: String,
    /// Device name.
    pub name: String,
    /// Hardware model identifier.
    pub model: String,
    /// MAC address.
    pub mac_address: String,
    /// IP address, when known.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Adoption and connectivity state.
    pub state: DeviceState,
    /// Capability summary in either wire encoding.
    #[serde(default)]
    pub features: Option<Value>,
    /// Interface summary in either wire encoding.
    #[serde(default)]
    pub interfaces: Option<Value>,
}

/// Full detail for a single device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    /// Device UUID.
    pub id: String,
    /// Device name.
    pub name: String,
    /// Hardware model identifier.
    pub model: String,
    /// MAC address.
    pub mac_address: String,
    /// IP address, when known.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Adoption and connectivity state.
    pub state: DeviceState,
    /// Whether this model is supported by the application.
    pub supported: bool,
    /// Installed firmware version.
    #[serde(default)]
    pub firmware_version: Option<String>,
    /// Whether a firmware update is available.
    #[serde(default)]
    pub firmware_updatable: Option<bool>,
    /// Adoption time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub adopted_at: Option<OffsetDateTime>,
    /// Last provisioning time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub provisioned_at: Option<OffsetDateTime>,
    /// Active configuration identifier.
    #[serde(default)]
    pub configuration_id: Option<String>,
    /// Upstream device, when wired in.
    #[serde(default)]
    pub uplink: Option<DeviceUplink>,
    /// Typed capability blocks.
    #[serde(default)]
    pub features: Option<DeviceFeatures>,
    /// Typed interface blocks.
    #[serde(default)]
    pub interfaces: Option<DeviceInterfaces>,
}

/// Latest statistics snapshot for a device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatistics {
    /// Uptime in seconds.
    pub uptime_sec: u64,
    /// Time of the last received heartbeat.
    #[serde(with = "time::serde::rfc3339")]
    pub last_heartbeat_at: OffsetDateTime,
    /// Expected time of the next heartbeat.
    #[serde(with = "time::serde::rfc3339")]
    pub next_heartbeat_at: OffsetDateTime,
    /// One-minute load average.
    #[serde(rename = "loadAverage1Min")]
    pub load_average_1min: f64,
    /// Five-minute load average.
    #[serde(rename = "loadAverage5Min")]
    pub load_average_5min: f64,
    /// Fifteen-minute load average.
    #[serde(rename = "loadAverage15Min")]
    pub load_average_15min: f64,
    /// CPU utilization percentage.
    pub cpu_utilization_pct: f64,
    /// Memory utilization percentage.
    pub memory_utilization_pct: f64,
    /// Uplink throughput details.
    #[serde(default)]
    pub uplink: Option<Value>,
    /// Per-interface statistics.
    #[serde(default)]
    pub interfaces: Option<Value>,
}

// ============================================================================
// SECTION: Clients
// ============================================================================

/// How a client was granted network access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientAccessType {
    /// Regular network access.
    Default,
    /// Guest network access.
    Guest,
    /// Hotspot portal access.
    Hotspot,
}

/// Access grant of a connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAccess {
    /// Access type.
    #[serde(rename = "type")]
    pub access_type: ClientAccessType,
    /// Whether a guest client is currently authorized.
    #[serde(default)]
    pub authorized: Option<bool>,
}

/// Fields common to every client type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    /// Client UUID.
    pub id: String,
    /// Client name, when known.
    #[serde(default)]
    pub name: Option<String>,
    /// Time the client connected.
    #[serde(with = "time::serde::rfc3339")]
    pub connected_at: OffsetDateTime,
    /// IP address, when assigned.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Access grant.
    pub access: ClientAccess,
}

/// A client connected over a wired port.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiredClient {
    /// Common client fields.
    #[serde(flatten)]
    pub summary: ClientSummary,
    /// MAC address.
    pub mac_address: String,
    /// UUID of the device the client is plugged into.
    pub uplink_device_id: String,
}

/// A client connected over Wi-Fi.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessClient {
    /// Common client fields.
    #[serde(flatten)]
    pub summary: ClientSummary,
    /// MAC address.
    pub mac_address: String,
    /// UUID of the access point the client is associated with.
    pub uplink_device_id: String,
    /// Signal strength in dBm, when reported.
    #[serde(default)]
    pub signal_strength: Option<i32>,
    /// Network name the client joined.
    #[serde(default)]
    pub ssid: Option<String>,
}

/// A connected client, discriminated by the wire `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum NetworkClient {
    /// Wired client.
    #[serde(rename = "WIRED")]
    Wired(WiredClient),
    /// Wireless client.
    #[serde(rename = "WIRELESS")]
    Wireless(WirelessClient),
    /// VPN client.
    #[serde(rename = "VPN")]
    Vpn(ClientSummary),
    /// Teleport client.
    #[serde(rename = "TELEPORT")]
    Teleport(ClientSummary),
}

impl NetworkClient {
    /// Returns the fields common to every client type.
    #[must_use]
    pub const fn summary(&self) -> &ClientSummary {
        match self {
            Self::Wired(client) => &client.summary,
            Self::Wireless(client) => &client.summary,
            Self::Vpn(summary) | Self::Teleport(summary) => summary,
        }
    }

    /// Returns the client UUID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.summary().id
    }
}

// ============================================================================
// SECTION: Vouchers
// ============================================================================

/// A hotspot voucher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    /// Voucher UUID.
    pub id: String,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Voucher note.
    pub name: String,
    /// Numeric code guests enter.
    pub code: u64,
    /// Guests allowed per voucher.
    pub authorized_guest_limit: u32,
    /// Guests already authorized.
    pub authorized_guest_count: u32,
    /// Time of first activation.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub activated_at: Option<OffsetDateTime>,
    /// Expiry time, once activated.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    /// Whether the voucher has expired.
    pub expired: bool,
    /// Access duration per guest, in minutes.
    pub time_limit_minutes: u32,
    /// Data cap in megabytes, when set.
    #[serde(default, rename = "dataUsageLimitMBytes")]
    pub data_usage_limit_mbytes: Option<u32>,
    /// Download rate cap in Kbps, when set.
    #[serde(default)]
    pub rx_rate_limit_kbps: Option<u32>,
    /// Upload rate cap in Kbps, when set.
    #[serde(default)]
    pub tx_rate_limit_kbps: Option<u32>,
}

/// Response body of voucher creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherResponse {
    /// The vouchers that were created.
    pub vouchers: Vec<Voucher>,
}

/// Response body of voucher deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVoucherResponse {
    /// Number of vouchers removed.
    pub vouchers_deleted: u64,
}
