// crates/unifi-network-config/src/lib.rs
// ============================================================================
// Module: Config Root
// Description: Public API surface for client settings.
// Purpose: Single source of truth for unifi-client.toml semantics.
// Dependencies: crate::settings
// ============================================================================

//! ## Overview
//! `unifi-network-config` defines the settings model for the client: TOML
//! file loading with strict limits, environment overrides for credentials,
//! fail-closed validation, and conversion into the transport configuration
//! and retry policy the engine consumes.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use settings::API_KEY_ENV_VAR;
pub use settings::ApiSettings;
pub use settings::CONFIG_ENV_VAR;
pub use settings::CONTROLLER_URL_ENV_VAR;
pub use settings::ControllerSettings;
pub use settings::Settings;
pub use settings::SettingsError;
