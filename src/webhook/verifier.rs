//! Authentication of inbound webhook deliveries.

use std::fmt;
use std::time::Duration;

use http::HeaderMap;

use crate::config::defaults;
use crate::time::{Clock, SystemClock};

use super::signature::{HmacSha256, keyed_mac, sign_with};
use super::{WebhookError, WebhookEvent, constant_time_eq};

/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "x-lystica-signature";

/// Header carrying the Unix timestamp the signature was made at.
pub const TIMESTAMP_HEADER: &str = "x-lystica-timestamp";

/// Maximum accepted distance between the timestamp and now.
pub const DEFAULT_TOLERANCE: Duration = defaults::webhook_tolerance();

/// Verifies signed webhook deliveries against a shared secret.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. Both header values are non-empty, otherwise [`WebhookError::MissingHeaders`]
/// 2. The timestamp is an integer within the tolerance of now, otherwise
///    [`WebhookError::StaleOrInvalidTimestamp`]
/// 3. The signature matches, compared in constant time, otherwise
///    [`WebhookError::SignatureMismatch`]
/// 4. The body parses as a [`WebhookEvent`], otherwise
///    [`WebhookError::MalformedPayload`]
///
/// The verifier is immutable and can be shared between request handlers.
///
/// # Type Parameters
///
/// - `C`: clock used for the freshness check (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use lystica_cloud::time::FixedClock;
/// use lystica_cloud::webhook::WebhookVerifier;
///
/// let verifier = WebhookVerifier::new("whsec_test")
///     .unwrap()
///     .with_clock(FixedClock::at(1_700_000_000));
///
/// let body = r#"{"id":"evt_1","type":"contact.created","data":{},"createdAt":"2023-11-14T22:13:20Z"}"#;
/// let signature = verifier.sign("1700000000", body);
///
/// let event = verifier.verify(body, &signature, "1700000000").unwrap();
/// assert_eq!(event.event_type, "contact.created");
/// ```
#[derive(Clone)]
pub struct WebhookVerifier<C = SystemClock> {
    mac: HmacSha256,
    tolerance: Duration,
    clock: C,
}

impl<C: fmt::Debug> fmt::Debug for WebhookVerifier<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<redacted>")
            .field("tolerance", &self.tolerance)
            .field("clock", &self.clock)
            .finish()
    }
}

impl WebhookVerifier<SystemClock> {
    /// Creates a verifier for `secret` using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::EmptySecret`] if `secret` is empty.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, WebhookError> {
        Ok(Self {
            mac: keyed_mac(secret.as_ref())?,
            tolerance: DEFAULT_TOLERANCE,
            clock: SystemClock,
        })
    }
}

impl<C> WebhookVerifier<C> {
    /// Replaces the clock used for the freshness check.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> WebhookVerifier<C2> {
        WebhookVerifier {
            mac: self.mac,
            tolerance: self.tolerance,
            clock,
        }
    }

    /// Sets the tolerance used by [`WebhookVerifier::verify`].
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the default tolerance of this verifier.
    #[must_use]
    pub const fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Produces the signature Lystica Cloud would send for this delivery.
    #[must_use]
    pub fn sign(&self, timestamp: &str, raw_body: impl AsRef<[u8]>) -> String {
        sign_with(&self.mac, timestamp, raw_body.as_ref())
    }
}

impl<C: Clock> WebhookVerifier<C> {
    /// Verifies a delivery with the verifier's tolerance and parses the event.
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookError`] of the first check that fails.
    pub fn verify(
        &self,
        raw_body: impl AsRef<[u8]>,
        signature: &str,
        timestamp: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        self.verify_with_tolerance(raw_body, signature, timestamp, self.tolerance)
    }

    /// Verifies a delivery with an explicit tolerance and parses the event.
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookError`] of the first check that fails.
    pub fn verify_with_tolerance(
        &self,
        raw_body: impl AsRef<[u8]>,
        signature: &str,
        timestamp: &str,
        tolerance: Duration,
    ) -> Result<WebhookEvent, WebhookError> {
        let raw_body = raw_body.as_ref();
        self.authenticate(raw_body, signature, timestamp, tolerance)?;

        serde_json::from_slice(raw_body).map_err(WebhookError::MalformedPayload)
    }

    /// Verifies a delivery using the signature and timestamp headers.
    ///
    /// Absent or non-UTF-8 headers count as missing.
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookError`] of the first check that fails.
    pub fn verify_headers(
        &self,
        headers: &HeaderMap,
        raw_body: impl AsRef<[u8]>,
    ) -> Result<WebhookEvent, WebhookError> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
        };

        self.verify(raw_body, header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    }

    /// Runs every check except payload parsing.
    ///
    /// Surrounding whitespace is ignored when reading `timestamp` as seconds,
    /// but the signature covers the header value exactly as received.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::MissingHeaders`],
    /// [`WebhookError::StaleOrInvalidTimestamp`] or
    /// [`WebhookError::SignatureMismatch`].
    pub fn authenticate(
        &self,
        raw_body: &[u8],
        signature: &str,
        timestamp: &str,
        tolerance: Duration,
    ) -> Result<(), WebhookError> {
        if signature.is_empty() || timestamp.is_empty() {
            return Err(WebhookError::MissingHeaders);
        }

        let sent_at: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::StaleOrInvalidTimestamp)?;
        let age = self.clock.unix_seconds().abs_diff(sent_at);
        if age > tolerance.as_secs() {
            tracing::debug!(sent_at, age, "Rejected webhook with stale timestamp");
            return Err(WebhookError::StaleOrInvalidTimestamp);
        }

        let expected = sign_with(&self.mac, timestamp, raw_body);
        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            tracing::debug!("Rejected webhook with mismatched signature");
            return Err(WebhookError::SignatureMismatch);
        }

        Ok(())
    }
}
