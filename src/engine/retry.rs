//! Retry budget and backoff schedule for API requests.

use std::time::Duration;

use rand::Rng;

/// Source of random jitter added on top of each backoff delay.
///
/// Injectable so tests can make backoff deterministic.
pub trait Jitter: Send + Sync {
    /// Returns a duration in `[0, max)`. Returns zero when `max` is zero.
    fn jitter(&self, max: Duration) -> Duration;
}

/// Uniform jitter from the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn jitter(&self, max: Duration) -> Duration {
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

/// No jitter at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn jitter(&self, _max: Duration) -> Duration {
        Duration::ZERO
    }
}

/// Exponential backoff with a fixed schedule and a configurable retry budget.
///
/// The delay before retry `n` (0-indexed) is
/// `min(1000ms × 2^n, 10000ms)` plus jitter in `[0, 500ms)`.
/// Retryable statuses and transport failures draw from the same budget.
///
/// # Example
///
/// ```
/// use lystica_cloud::engine::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new().with_max_retries(3);
/// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(1000));
/// assert_eq!(policy.delay_for_retry(4), Duration::from_millis(10_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the initial one.
    ///
    /// Zero means a single attempt and no retries.
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 2;

    /// Delay before the first retry.
    pub const INITIAL_DELAY: Duration = Duration::from_millis(1000);

    /// Cap on the exponential part of the delay.
    pub const MAX_DELAY: Duration = Duration::from_millis(10_000);

    /// Upper bound (exclusive) of the jitter added to every delay.
    pub const MAX_JITTER: Duration = Duration::from_millis(500);

    /// Creates a policy with the default retry budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets the number of retries after the initial attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Computes the backoff before the next attempt, without jitter.
    ///
    /// `attempt` is the 0-indexed attempt that just failed, so the first
    /// retry waits `delay_for_retry(0)`.
    #[must_use]
    pub fn delay_for_retry(&self, attempt: u32) -> Duration {
        // Durations here are far below u64::MAX milliseconds
        #[allow(clippy::cast_possible_truncation)]
        let initial_ms = Self::INITIAL_DELAY.as_millis() as u64;
        #[allow(clippy::cast_possible_truncation)]
        let max_ms = Self::MAX_DELAY.as_millis() as u64;

        let factor = 1_u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(initial_ms.saturating_mul(factor).min(max_ms))
    }

    /// Computes the backoff before the next attempt, jitter included.
    #[must_use]
    pub fn backoff(&self, attempt: u32, jitter: &impl Jitter) -> Duration {
        self.delay_for_retry(attempt) + jitter.jitter(Self::MAX_JITTER)
    }

    /// Returns true if another attempt may follow the 0-indexed `attempt`.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
