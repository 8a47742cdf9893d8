// crates/unifi-network-config/src/settings.rs
// ============================================================================
// Module: Client Settings
// Description: Settings loading and validation for the client engine.
// Purpose: Provide strict, fail-closed settings parsing with hard limits.
// Dependencies: serde, toml, unifi-network-core, unifi-network-transport, url
// ============================================================================

//! ## Overview
//! Settings load from a TOML file with strict size limits, then take
//! environment overrides for the controller URL and API key so credentials
//! can stay out of the file. Missing or invalid settings fail closed; there
//! is no partially configured client.
//!
//! The settings type converts directly into the transport configuration and
//! retry policy the rest of the stack consumes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use unifi_network_core::RetryPolicy;
use unifi_network_transport::HttpTransportConfig;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default settings filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "unifi-client.toml";
/// Environment variable used to override the settings path.
pub const CONFIG_ENV_VAR: &str = "UNIFI_CLIENT_CONFIG";
/// Environment variable overriding the controller URL.
pub const CONTROLLER_URL_ENV_VAR: &str = "UNIFI_CONTROLLER_URL";
/// Environment variable overriding the API key.
pub const API_KEY_ENV_VAR: &str = "UNIFI_API_KEY";
/// Maximum settings file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 600_000;
/// Maximum retry attempts, including the first.
pub(crate) const MAX_RETRY_ATTEMPTS: u32 = 10;
/// Maximum delay between retries in milliseconds.
pub(crate) const MAX_RETRY_DELAY_MS: u64 = 60_000;
/// Largest default page size accepted by standard list endpoints.
pub(crate) const MAX_DEFAULT_PAGE_SIZE: u64 = 200;
/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default retry attempts, including the first.
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Default delay between retries in milliseconds.
const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;
/// Default page size for list requests.
const DEFAULT_PAGE_SIZE: u64 = 25;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// I/O failure while reading the settings file.
    #[error("settings io error: {0}")]
    Io(String),
    /// TOML parsing failure.
    #[error("settings parse error: {0}")]
    Parse(String),
    /// Invalid settings data.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Settings Types
// ============================================================================

/// Controller connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ControllerSettings {
    /// Controller origin, e.g. `https://192.168.1.1`.
    #[serde(default)]
    pub url: Option<String>,
    /// API key; prefer the environment variable over the file.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Accept self-signed controller certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Request behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSettings {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retry attempts per request, including the first.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Default page size for list requests.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

/// Serde default for `timeout_ms`.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Serde default for `retry_attempts`.
const fn default_retry_attempts() -> u32 {
    DEFAULT_RETRY_ATTEMPTS
}

/// Serde default for `retry_delay_ms`.
const fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

/// Serde default for `default_page_size`.
const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Complete client settings.
///
/// # Invariants
/// - After [`Settings::load`] returns, the controller URL parses, its
///   scheme is HTTP or HTTPS, and the API key is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Controller connection settings.
    #[serde(default)]
    pub controller: ControllerSettings,
    /// Request behavior settings.
    #[serde(default)]
    pub api: ApiSettings,
}

impl Settings {
    /// Loads settings from the given path, the `UNIFI_CLIENT_CONFIG`
    /// environment variable, or `unifi-client.toml` in the working
    /// directory, then applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read, does not
    /// parse, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let resolved = resolve_config_path(path);
        let bytes = fs::read(&resolved).map_err(|err| SettingsError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(SettingsError::Invalid("settings file exceeds size limit".to_owned()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| SettingsError::Invalid("settings file must be utf-8".to_owned()))?;
        let mut settings: Self =
            toml::from_str(content).map_err(|err| SettingsError::Parse(err.to_string()))?;
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Builds settings from environment variables alone.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the controller URL or API key is
    /// missing or invalid.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self {
            controller: ControllerSettings::default(),
            api: ApiSettings::default(),
        };
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Applies `UNIFI_CONTROLLER_URL` and `UNIFI_API_KEY` over file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(CONTROLLER_URL_ENV_VAR)
            && !url.is_empty()
        {
            self.controller.url = Some(url);
        }
        if let Ok(key) = env::var(API_KEY_ENV_VAR)
            && !key.is_empty()
        {
            self.controller.api_key = Some(key);
        }
    }

    /// Validates every field, failing closed on the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] naming the offending field.
    pub fn validate(&mut self) -> Result<(), SettingsError> {
        let url = self
            .controller
            .url
            .as_deref()
            .ok_or_else(|| SettingsError::Invalid("controller.url must be set".to_owned()))?;
        let trimmed = url.trim_end_matches('/').to_owned();
        let parsed = Url::parse(&trimmed)
            .map_err(|err| SettingsError::Invalid(format!("controller.url: {err}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SettingsError::Invalid(format!(
                    "controller.url has unsupported scheme {other:?}"
                )));
            }
        }
        if parsed.host_str().is_none() {
            return Err(SettingsError::Invalid("controller.url has no host".to_owned()));
        }
        self.controller.url = Some(trimmed);

        let key = self
            .controller
            .api_key
            .as_deref()
            .ok_or_else(|| SettingsError::Invalid("controller.api_key must be set".to_owned()))?;
        if key.is_empty() {
            return Err(SettingsError::Invalid("controller.api_key must not be empty".to_owned()));
        }

        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.api.timeout_ms) {
            return Err(SettingsError::Invalid(format!(
                "api.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.api.retry_attempts == 0 || self.api.retry_attempts > MAX_RETRY_ATTEMPTS {
            return Err(SettingsError::Invalid(format!(
                "api.retry_attempts must be between 1 and {MAX_RETRY_ATTEMPTS}"
            )));
        }
        if self.api.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(SettingsError::Invalid(format!(
                "api.retry_delay_ms must be at most {MAX_RETRY_DELAY_MS}"
            )));
        }
        if self.api.default_page_size == 0 || self.api.default_page_size > MAX_DEFAULT_PAGE_SIZE {
            return Err(SettingsError::Invalid(format!(
                "api.default_page_size must be between 1 and {MAX_DEFAULT_PAGE_SIZE}"
            )));
        }
        Ok(())
    }

    /// Returns the validated controller origin.
    #[must_use]
    pub fn controller_url(&self) -> &str {
        self.controller.url.as_deref().unwrap_or_default()
    }

    /// Returns the full integration API base URL.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.controller_url(), unifi_network_transport::API_PREFIX)
    }

    /// Converts into the transport configuration.
    #[must_use]
    pub fn transport_config(&self) -> HttpTransportConfig {
        let mut config = HttpTransportConfig::new(
            self.controller_url(),
            self.controller.api_key.clone().unwrap_or_default(),
        );
        config.timeout_ms = self.api.timeout_ms;
        config.accept_invalid_certs = self.controller.accept_invalid_certs;
        config
    }

    /// Converts into the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: NonZeroU32::new(self.api.retry_attempts).unwrap_or(NonZeroU32::MIN),
            backoff: unifi_network_core::Backoff::Fixed(Duration::from_millis(
                self.api.retry_delay_ms,
            )),
        }
    }
}

// ============================================================================
// SECTION: Path Resolution
// ============================================================================

/// Resolves the settings path from the argument, environment, or default.
fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}
