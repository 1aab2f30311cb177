//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::client::{ClientConfig, parse_base_url, redact, validate_api_key};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the binary.
///
/// Secrets are optional here because only some commands need them; use
/// [`ValidatedConfig::client_config`] and [`ValidatedConfig::signing_secret`]
/// to require them.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Clone)]
pub struct ValidatedConfig {
    /// API key, if one was provided
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: Url,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Retries after the first attempt
    pub max_retries: u32,

    /// Webhook signing secret, if one was provided
    pub signing_secret: Option<String>,

    /// Maximum accepted webhook timestamp age
    pub webhook_tolerance: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("api_key", &self.api_key.as_deref().map(redact))
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "<redacted>"))
            .field("webhook_tolerance", &self.webhook_tolerance)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, api_key: {}, timeout: {}s, max_retries: {}, \
             signing_secret: {}, webhook_tolerance: {}s }}",
            self.base_url,
            self.api_key.as_deref().map_or_else(|| "none".to_string(), redact),
            self.timeout.as_secs(),
            self.max_retries,
            if self.signing_secret.is_some() { "set" } else { "none" },
            self.webhook_tolerance.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is present but malformed
    /// - The base URL is invalid
    /// - The timeout or webhook tolerance is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let client = toml.map(|t| &t.client);
        let webhook = toml.map(|t| &t.webhook);

        let api_key = cli
            .api_key
            .clone()
            .or_else(|| client.and_then(|c| c.api_key.clone()))
            .filter(|key| !key.is_empty());
        if let Some(ref key) = api_key {
            validate_api_key(key)?;
        }

        let base_url_str = cli
            .base_url
            .as_deref()
            .or_else(|| client.and_then(|c| c.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);
        let base_url = parse_base_url(base_url_str)?;

        let timeout = positive_secs(
            field::TIMEOUT,
            cli.timeout
                .or_else(|| client.and_then(|c| c.timeout))
                .unwrap_or(defaults::TIMEOUT_SECS),
        )?;

        let max_retries = cli
            .max_retries
            .or_else(|| client.and_then(|c| c.max_retries))
            .unwrap_or(defaults::MAX_RETRIES);

        let signing_secret = cli
            .signing_secret
            .clone()
            .or_else(|| webhook.and_then(|w| w.signing_secret.clone()))
            .filter(|secret| !secret.is_empty());

        let webhook_tolerance = positive_secs(
            field::TOLERANCE,
            webhook
                .and_then(|w| w.tolerance)
                .unwrap_or(defaults::WEBHOOK_TOLERANCE_SECS),
        )?;

        Ok(Self {
            api_key,
            base_url,
            timeout,
            max_retries,
            signing_secret,
            webhook_tolerance,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the API client settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no API key was provided.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                "Use --api-key, set LYSTICA_API_KEY, or set client.api_key in config file",
            )
        })?;

        let config = ClientConfig::new(api_key)
            .with_base_url(self.base_url.as_str())
            .with_timeout(self.timeout)
            .with_max_retries(self.max_retries);
        config.validate()?;
        Ok(config)
    }

    /// Returns the webhook signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret was provided.
    pub fn signing_secret(&self) -> Result<&str, ConfigError> {
        self.signing_secret.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::SIGNING_SECRET,
                "Use --signing-secret, set LYSTICA_WEBHOOK_SECRET, or set webhook.signing_secret in config file",
            )
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}
