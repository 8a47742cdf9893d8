// crates/unifi-network-core/src/retry.rs
// ============================================================================
// Module: Retry Policy
// Description: Attempt budgets, backoff schedules, and idempotency marking.
// Purpose: Decide how many times a failed request is re-sent and how long to
//          wait between attempts.
// Dependencies: std::time
// ============================================================================

//! ## Overview
//! The policy is deliberately small: a total attempt budget and a backoff
//! schedule. Which failures are eligible for retry is the error taxonomy's
//! concern ([`crate::error::RetryClass`]); whether a request is eligible at
//! all is the caller's, declared via [`Idempotency`].
//!
//! Sleeping goes through the [`Sleeper`] trait so tests can observe the
//! schedule without waiting on wall-clock time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

// ============================================================================
// SECTION: Backoff
// ============================================================================

/// Delay schedule between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// The same delay before every retry.
    Fixed(Duration),
    /// Delay doubles after each retry, saturating at `cap`.
    Exponential {
        /// Delay before the first retry.
        initial: Duration,
        /// Upper bound on any single delay.
        cap: Duration,
    },
}

impl Backoff {
    /// Returns the delay before the given retry.
    ///
    /// `retry` is zero-based: 0 is the wait between the first attempt and
    /// the second.
    #[must_use]
    pub fn delay_for(self, retry: u32) -> Duration {
        match self {
            Self::Fixed(delay) => delay,
            Self::Exponential {
                initial,
                cap,
            } => {
                let factor = 2u32.saturating_pow(retry);
                initial.saturating_mul(factor).min(cap)
            }
        }
    }
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Retry budget applied to retryable failures.
///
/// # Invariants
/// - `max_attempts` counts the first attempt, so a value of 1 disables
///   retries entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: NonZeroU32,
    /// Delay schedule between attempts.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Builds a policy with a fixed delay between attempts.
    ///
    /// A zero `max_attempts` is clamped to 1.
    #[must_use]
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: NonZeroU32::new(max_attempts).unwrap_or(NonZeroU32::MIN),
            backoff: Backoff::Fixed(delay),
        }
    }

    /// Policy that performs exactly one attempt.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: NonZeroU32::MIN,
            backoff: Backoff::Fixed(Duration::ZERO),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(1))
    }
}

/// Whether a request may be safely re-sent.
///
/// Mutating operations are marked [`Idempotency::NonIdempotent`]; their
/// failures surface immediately because a retry could repeat the side
/// effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idempotency {
    /// Safe to re-send; retryable failures consume the attempt budget.
    Idempotent,
    /// Never re-sent; every failure surfaces immediately.
    NonIdempotent,
}

// ============================================================================
// SECTION: Sleeper
// ============================================================================

/// Clock seam for retry delays.
pub trait Sleeper: Send + Sync {
    /// Blocks the calling thread for the given duration.
    fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by [`thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
