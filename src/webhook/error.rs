//! Error types for webhook verification.

use thiserror::Error;

/// Reasons a webhook delivery is rejected.
///
/// Variants are ordered by the check that produces them; a delivery fails on
/// the first check it does not pass.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature or timestamp header is missing or empty.
    #[error("Missing webhook signature or timestamp header")]
    MissingHeaders,

    /// The timestamp is not an integer, or is outside the tolerance window.
    #[error("Webhook timestamp is invalid or outside the tolerance window")]
    StaleOrInvalidTimestamp,

    /// The signature does not match the payload.
    #[error("Webhook signature does not match")]
    SignatureMismatch,

    /// The payload is authentic but is not a valid event.
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The verifier was built with an empty signing secret.
    #[error("Webhook signing secret must not be empty")]
    EmptySecret,
}

impl WebhookError {
    /// Returns true if the delivery should be treated as forged or replayed.
    ///
    /// Malformed payloads passed authentication and an empty secret is a
    /// local setup problem, so neither counts.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingHeaders | Self::StaleOrInvalidTimestamp | Self::SignatureMismatch
        )
    }
}
