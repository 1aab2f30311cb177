//! Time abstractions for testability.
//!
//! This module provides:
//! - [`Clock`]: the current wall-clock time (used for webhook timestamp checks)
//! - [`Sleeper`]: an async delay (used between request retries)
//!
//! Production code uses [`SystemClock`] and [`TokioSleeper`]; tests inject
//! fixed clocks and [`InstantSleeper`] so nothing actually waits.

use std::future::Future;
use std::time::{Duration, SystemTime};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use lystica_cloud::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as whole seconds since the Unix epoch.
    ///
    /// Times before the epoch are reported as negative values.
    fn unix_seconds(&self) -> i64 {
        match self.now().duration_since(SystemTime::UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |s| -s),
        }
    }
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a fixed number of seconds after the Unix epoch.
///
/// Handy for verifying webhook payloads captured at a known time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    secs: u64,
}

impl FixedClock {
    /// Creates a clock that always reports `secs` seconds after the epoch.
    #[must_use]
    pub const fn at(secs: u64) -> Self {
        Self { secs }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.secs)
    }
}

/// Abstraction over async delays.
///
/// The request engine sleeps through a `Sleeper` between retry attempts so
/// tests can substitute [`InstantSleeper`] and run without real waits.
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Intended for tests; never use it in production, it turns retries into a
/// tight loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
