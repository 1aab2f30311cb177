//! Settings for a [`LysticaCloud`](crate::LysticaCloud) client.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::defaults;
use super::error::{ConfigError, field};

/// Connection settings for the Lystica Cloud API.
///
/// Only the API key is required; everything else has a default.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lystica_cloud::config::ClientConfig;
///
/// let config = ClientConfig::new("lys_live_abc123")
///     .with_timeout(Duration::from_secs(10))
///     .with_max_retries(5);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bearer API key, `lys_live_...` or `lys_test_...`
    pub api_key: String,

    /// Base address; trailing slashes are ignored
    pub base_url: String,

    /// Deadline for each individual attempt
    pub timeout: Duration,

    /// Retries after the initial attempt
    pub max_retries: u32,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ClientConfig {
    /// Creates settings for `api_key` with default address, timeout and retries.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::BASE_URL.to_string(),
            timeout: defaults::timeout(),
            max_retries: defaults::MAX_RETRIES,
        }
    }

    /// Sets the base address.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of retries after the initial attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Checks the settings before any request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is empty or lacks a `lys_live_` / `lys_test_` prefix
    /// - The base address is not an absolute `http` or `https` URL
    /// - The timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_api_key(&self.api_key)?;
        parse_base_url(&self.base_url)?;

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Checks that `api_key` is non-empty and carries a known prefix.
pub(super) fn validate_api_key(api_key: &str) -> Result<(), ConfigError> {
    if api_key.trim().is_empty() {
        return Err(ConfigError::missing(
            field::API_KEY,
            "Use --api-key, set LYSTICA_API_KEY, or set client.api_key in config file",
        ));
    }

    let has_prefix = defaults::API_KEY_PREFIXES
        .iter()
        .any(|prefix| api_key.len() > prefix.len() && api_key.starts_with(prefix));

    if has_prefix {
        Ok(())
    } else {
        Err(ConfigError::InvalidApiKey {
            reason: "expected a key starting with lys_live_ or lys_test_",
        })
    }
}

/// Parses `base_url` as an absolute http(s) address.
pub(super) fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment".to_string()));
    }

    Ok(url)
}

/// Keeps the key prefix and hides the rest.
pub(super) fn redact(api_key: &str) -> String {
    defaults::API_KEY_PREFIXES
        .iter()
        .find(|prefix| api_key.starts_with(*prefix))
        .map_or_else(|| "<redacted>".to_string(), |prefix| format!("{prefix}<redacted>"))
}
