// crates/unifi-network-api/src/lib.rs
// ============================================================================
// Module: API Surface Root
// Description: Public API surface for the typed endpoint layer.
// Purpose: Wire together models, action requests, the endpoint surface, and
//          device search.
// Dependencies: crate::{actions, client, models, search}
// ============================================================================

//! ## Overview
//! This crate is the typed face of the UniFi Network Integration API:
//! resource models, bound-checked action requests, and a site-scoped
//! endpoint surface ([`NetworkApi`]) driven by the core executor. Filters
//! given as source strings are compiled against each resource's schema
//! before any request is sent.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod actions;
pub mod client;
pub mod models;
pub mod search;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use actions::AuthorizeGuestRequest;
pub use actions::CreateVoucherRequest;
pub use actions::DATA_USAGE_LIMIT_MBYTES;
pub use actions::DeviceActionRequest;
pub use actions::PortActionRequest;
pub use actions::RATE_LIMIT_KBPS;
pub use actions::TIME_LIMIT_MINUTES;
pub use actions::UnauthorizeGuestRequest;
pub use actions::VOUCHER_COUNT;
pub use actions::VoucherSpec;
pub use client::ListOptions;
pub use client::NetworkApi;
pub use client::compile_filter;
pub use models::ApplicationInfo;
pub use models::ClientAccess;
pub use models::ClientAccessType;
pub use models::ClientSummary;
pub use models::CreateVoucherResponse;
pub use models::DeleteVoucherResponse;
pub use models::Device;
pub use models::DeviceDetails;
pub use models::DeviceFeatures;
pub use models::DeviceInterfaces;
pub use models::DeviceState;
pub use models::DeviceStatistics;
pub use models::DeviceUplink;
pub use models::NetworkClient;
pub use models::PoeInfo;
pub use models::PoeStandard;
pub use models::Port;
pub use models::PortConnector;
pub use models::PortState;
pub use models::Radio;
pub use models::Site;
pub use models::Voucher;
pub use models::WiredClient;
pub use models::WirelessClient;
pub use models::WlanStandard;
pub use search::DeviceSearch;
