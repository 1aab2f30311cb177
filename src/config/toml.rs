//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API client configuration section
    #[serde(default)]
    pub client: ClientSection,

    /// Webhook verification configuration section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// API key
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: Option<String>,

    /// Per-attempt timeout in seconds
    pub timeout: Option<u64>,

    /// Retries after the first attempt
    pub max_retries: Option<u32>,
}

/// Webhook verification configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Signing secret shared with Lystica Cloud
    pub signing_secret: Option<String>,

    /// Maximum accepted timestamp age in seconds
    pub tolerance: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Lystica Cloud client configuration

[client]
# API key (required for API commands; prefer the LYSTICA_API_KEY environment variable)
# api_key = "lys_live_..."

# API base URL (default: https://api.lystica.cloud)
# base_url = "https://api.lystica.cloud"

# Per-attempt request timeout in seconds (default: 30)
timeout = 30

# Retries after the first attempt for 408/502/503/504 and network failures (default: 2)
max_retries = 2

[webhook]
# Signing secret (required for verify-webhook; prefer LYSTICA_WEBHOOK_SECRET)
# signing_secret = "whsec_..."

# Maximum accepted timestamp age in seconds (default: 300)
# tolerance = 300
"#
    .to_string()
}
