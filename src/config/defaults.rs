//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default API base address.
pub const BASE_URL: &str = "https://api.lystica.cloud";

/// Default per-attempt timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default number of retries after the initial attempt.
pub const MAX_RETRIES: u32 = 2;

/// Default webhook timestamp tolerance in seconds.
pub const WEBHOOK_TOLERANCE_SECS: u64 = 300;

/// Prefixes every API key starts with.
pub const API_KEY_PREFIXES: [&str; 2] = ["lys_live_", "lys_test_"];

/// Page size used when walking every page of a listing.
pub const PAGE_SIZE: u32 = 200;

/// Default file name written by `lystica init`.
pub const CONFIG_FILE: &str = "lystica.toml";

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default webhook timestamp tolerance as Duration.
#[must_use]
pub const fn webhook_tolerance() -> Duration {
    Duration::from_secs(WEBHOOK_TOLERANCE_SECS)
}
