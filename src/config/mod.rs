//! Configuration layer for the Lystica Cloud client.
//!
//! This module provides:
//! - Client settings for library users ([`ClientConfig`])
//! - CLI argument parsing for the `lystica` binary ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration for the binary ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! For the binary, values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line, or through
//!    the `LYSTICA_API_KEY` / `LYSTICA_WEBHOOK_SECRET` environment variables
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The API key and the webhook signing secret have no default. They are only
//! required by the commands that use them, so `init` and `verify-webhook` work
//! without an API key.

mod cli;
mod client;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, ContactListArgs, ContactsCommand, VerifyWebhookArgs};
pub use client::ClientConfig;
pub use error::{ConfigError, field};
pub use toml::{ClientSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
