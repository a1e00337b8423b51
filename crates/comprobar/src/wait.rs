//! Bounded polling, the single wait primitive every scenario leans on.
//!
//! A probe is an async closure that inspects live page state and reports one
//! of three things: `Ok(Some(value))` settles the wait, `Ok(None)` schedules
//! another poll, and `Err` aborts immediately because a broken session is not
//! worth waiting out. Every wait carries a timeout, so no scenario can hang
//! on a slow storefront; it fails with a [`ComprobarError::Timeout`] naming
//! the condition that never settled.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::result::{ComprobarError, ComprobarResult};

// ============================================================================
// Constants
// ============================================================================

/// Default budget for a condition wait (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default pause between probes (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// ============================================================================
// Wait Options
// ============================================================================

/// Timeout and polling interval bounding a single wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total budget before the wait fails
    pub timeout: Duration,
    /// Pause between probe attempts
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitOptions {
    /// Options with the default budget and interval
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set the total budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause between probes
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Budget in whole milliseconds, for error reporting
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

// ============================================================================
// Condition Waits
// ============================================================================

/// Poll `probe` until it yields a value or the budget elapses.
///
/// The probe always runs at least once, so a zero timeout still observes the
/// current state; anything it yields on that first pass is returned. `what`
/// names the awaited condition in the timeout error.
///
/// # Errors
///
/// Returns [`ComprobarError::Timeout`] when the budget elapses with the
/// condition unsettled, or the probe's own error as soon as it surfaces one.
pub async fn await_condition<T, F, Fut>(
    what: &str,
    options: WaitOptions,
    mut probe: F,
) -> ComprobarResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ComprobarResult<Option<T>>>,
{
    let start = Instant::now();
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if start.elapsed() >= options.timeout {
            return Err(ComprobarError::Timeout {
                what: what.to_string(),
                ms: options.timeout_ms(),
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

/// Poll a boolean probe until it reports `true`.
///
/// Thin wrapper over [`await_condition`] for the common visibility and
/// presence checks that carry no value of their own.
///
/// # Errors
///
/// Same contract as [`await_condition`].
pub async fn await_flag<F, Fut>(
    what: &str,
    options: WaitOptions,
    mut probe: F,
) -> ComprobarResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ComprobarResult<bool>>,
{
    await_condition(what, options, move || {
        let attempt = probe();
        async move { Ok(attempt.await?.then_some(())) }
    })
    .await
}
