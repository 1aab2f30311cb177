//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Lystica Cloud command-line client
///
/// Talks to the Lystica Cloud API and verifies signed webhook deliveries.
#[derive(Debug, Parser)]
#[command(name = "lystica")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API key (lys_live_... or lys_test_...)
    #[arg(long = "api-key", env = "LYSTICA_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Per-attempt request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of retries after the first attempt
    #[arg(long = "max-retries", global = true)]
    pub max_retries: Option<u32>,

    /// Webhook signing secret
    #[arg(
        long = "signing-secret",
        env = "LYSTICA_WEBHOOK_SECRET",
        hide_env_values = true,
        global = true
    )]
    pub signing_secret: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for lystica
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Check the API key and print its name and scopes
    VerifyKey,

    /// Work with contacts
    Contacts {
        /// Contact operation
        #[command(subcommand)]
        command: ContactsCommand,
    },

    /// Verify a webhook delivery and print the event
    VerifyWebhook(VerifyWebhookArgs),
}

/// Contact subcommands
#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List contacts
    List(ContactListArgs),
}

/// Filters for `contacts list`
#[derive(Debug, Clone, Default, Args)]
pub struct ContactListArgs {
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by industry
    #[arg(long)]
    pub industry: Option<String>,

    /// Filter by country
    #[arg(long)]
    pub country: Option<String>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Follow cursors and print every page
    #[arg(long)]
    pub all: bool,
}

/// Inputs for `verify-webhook`
#[derive(Debug, Clone, Args)]
pub struct VerifyWebhookArgs {
    /// File holding the raw request body, or '-' for stdin
    #[arg(long, value_name = "FILE")]
    pub body: PathBuf,

    /// Value of the x-lystica-signature header
    #[arg(long)]
    pub signature: String,

    /// Value of the x-lystica-timestamp header
    #[arg(long)]
    pub timestamp: String,

    /// Maximum accepted timestamp age in seconds
    #[arg(long, value_name = "SECS")]
    pub tolerance: Option<u64>,
}

impl VerifyWebhookArgs {
    /// Returns true if the body should be read from stdin.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.body.as_os_str() == "-"
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
