//! Command execution.
//!
//! Each subcommand builds what it needs from the validated configuration,
//! runs, and writes its result to stdout. Handlers take their output sink as
//! a parameter so they can be exercised without a terminal.

use std::io::{self, Write};
use std::path::PathBuf;
use std::pin::pin;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio_stream::StreamExt;

use lystica_cloud::LysticaCloud;
use lystica_cloud::config::{
    ConfigError, ContactListArgs, ContactsCommand, Command, ValidatedConfig, VerifyWebhookArgs,
    write_default_config,
};
use lystica_cloud::engine::{ApiError, Jitter};
use lystica_cloud::resources::{Contact, ListContactsParams};
use lystica_cloud::time::{Clock, Sleeper};
use lystica_cloud::transport::HttpClient;
use lystica_cloud::webhook::{WebhookError, WebhookVerifier};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Settings were missing or invalid for the selected command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    /// The webhook delivery was rejected.
    #[error("Webhook verification failed: {0}")]
    Webhook(#[from] WebhookError),

    /// The webhook body could not be read.
    #[error("Failed to read webhook body from '{}': {source}", path.display())]
    ReadBody {
        /// Where the body was read from
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing the command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The result could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Executes `command` and prints its result to stdout.
///
/// # Errors
///
/// Returns the first failure of the command.
///
/// Excluded from coverage - talks to the real API and stdin.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &Command, config: &ValidatedConfig) -> Result<(), RunError> {
    let mut out = io::stdout().lock();

    match command {
        Command::Init { output } => {
            write_default_config(output)?;
            writeln!(out, "Configuration template written to: {}", output.display())?;
        }
        Command::VerifyKey => {
            let client = LysticaCloud::new(config.client_config()?)?;
            verify_key(&client, &mut out).await?;
        }
        Command::Contacts {
            command: ContactsCommand::List(args),
        } => {
            let client = LysticaCloud::new(config.client_config()?)?;
            list_contacts(&client, args, &mut out).await?;
        }
        Command::VerifyWebhook(args) => {
            let verifier = WebhookVerifier::new(config.signing_secret()?)?
                .with_tolerance(config.webhook_tolerance);
            let body = read_body(args).await?;
            verify_webhook(&verifier, args, &body, &mut out)?;
        }
    }

    Ok(())
}

/// Checks the API key and prints its metadata.
async fn verify_key<H, S, J>(
    client: &LysticaCloud<H, S, J>,
    out: &mut impl Write,
) -> Result<(), RunError>
where
    H: HttpClient,
    S: Sleeper,
    J: Jitter,
{
    let info = client.verify_key().await?;
    tracing::info!(key = %info.prefix, "API key is valid");

    writeln!(out, "Key:     {} ({})", info.name, info.prefix)?;
    writeln!(out, "Scopes:  {}", info.scopes.join(", "))?;
    if let Some(expires_at) = &info.expires_at {
        writeln!(out, "Expires: {expires_at}")?;
    }
    Ok(())
}

/// Lists contacts, one tab-separated line per contact.
///
/// Prints a single page unless `--all` is given, in which case every page is
/// followed and printed as it arrives.
async fn list_contacts<H, S, J>(
    client: &LysticaCloud<H, S, J>,
    args: &ContactListArgs,
    out: &mut impl Write,
) -> Result<(), RunError>
where
    H: HttpClient,
    S: Sleeper,
    J: Jitter,
{
    let params = contact_params(args);

    if args.all {
        let mut contacts = pin!(client.contacts().list_all(&params));
        let mut count = 0_usize;
        while let Some(contact) = contacts.next().await {
            write_contact(out, &contact?)?;
            count += 1;
        }
        tracing::info!(count, "Listed all contacts");
        return Ok(());
    }

    let page = client.contacts().list(&params).await?;
    for contact in &page.data {
        write_contact(out, contact)?;
    }
    if let Some(cursor) = page.meta.next_cursor() {
        tracing::info!(
            shown = page.data.len(),
            total = page.meta.total,
            cursor,
            "More contacts available, pass --all to list every page"
        );
    }
    Ok(())
}

fn contact_params(args: &ContactListArgs) -> ListContactsParams {
    ListContactsParams {
        search: args.search.clone(),
        industry: args.industry.clone(),
        country: args.country.clone(),
        limit: args.limit,
        ..ListContactsParams::default()
    }
}

fn write_contact(out: &mut impl Write, contact: &Contact) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}",
        contact.id,
        contact.full_name,
        contact.email,
        contact.company.as_deref().unwrap_or("-")
    )
}

/// Reads the raw webhook body from the file or stdin, byte for byte.
async fn read_body(args: &VerifyWebhookArgs) -> Result<Vec<u8>, RunError> {
    let read_error = |source: io::Error| RunError::ReadBody {
        path: args.body.clone(),
        source,
    };

    if args.reads_stdin() {
        let mut body = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut body)
            .await
            .map_err(read_error)?;
        Ok(body)
    } else {
        std::fs::read(&args.body).map_err(read_error)
    }
}

/// Verifies a delivery and prints the event as pretty JSON.
fn verify_webhook<C: Clock>(
    verifier: &WebhookVerifier<C>,
    args: &VerifyWebhookArgs,
    body: &[u8],
    out: &mut impl Write,
) -> Result<(), RunError> {
    let tolerance = args
        .tolerance
        .map_or_else(|| verifier.tolerance(), Duration::from_secs);

    let event = verifier.verify_with_tolerance(body, &args.signature, &args.timestamp, tolerance)?;
    tracing::info!(id = %event.id, event_type = %event.event_type, "Webhook verified");

    serde_json::to_writer_pretty(&mut *out, &event)?;
    writeln!(out)?;
    Ok(())
}
