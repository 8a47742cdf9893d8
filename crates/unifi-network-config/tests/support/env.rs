// crates/unifi-network-config/tests/support/env.rs
// ============================================================================
// Module: Environment Helpers
// Description: Process-environment mutation for override tests.
// ============================================================================
//! ## Overview
//! Thin wrappers over the process environment so override tests can set and
//! clear variables in one place.

#![allow(unsafe_code, reason = "Test harness mutates process env for configuration.")]

/// Sets an environment variable for the current process.
pub fn set_var(key: &str, value: &str) {
    // SAFETY: Called only from the single env-override test; no other
    // thread reads these variables concurrently.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Removes an environment variable from the current process.
pub fn remove_var(key: &str) {
    // SAFETY: Called only from the single env-override test; no other
    // thread reads these variables concurrently.
    unsafe {
        std::env::remove_var(key);
    }
}
