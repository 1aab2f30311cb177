//! HMAC-SHA256 payload signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::WebhookError;

pub(super) type HmacSha256 = Hmac<Sha256>;

/// Builds the keyed MAC for `secret`.
pub(super) fn keyed_mac(secret: &[u8]) -> Result<HmacSha256, WebhookError> {
    if secret.is_empty() {
        return Err(WebhookError::EmptySecret);
    }

    <HmacSha256 as Mac>::new_from_slice(secret).map_err(|_| WebhookError::EmptySecret)
}

/// Signs `"{timestamp}.{body}"` with an already keyed MAC.
pub(super) fn sign_with(mac: &HmacSha256, timestamp: &str, body: &[u8]) -> String {
    let mut mac = mac.clone();
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    hex::encode(mac.finalize().into_bytes())
}

/// Computes the lowercase hex HMAC-SHA256 of `"{timestamp}.{body}"`.
///
/// # Errors
///
/// Returns [`WebhookError::EmptySecret`] if `secret` is empty.
pub fn compute_signature(
    secret: &[u8],
    timestamp: &str,
    body: &[u8],
) -> Result<String, WebhookError> {
    keyed_mac(secret).map(|mac| sign_with(&mac, timestamp, body))
}

/// Compares two byte strings in time that depends only on their lengths.
///
/// Different lengths are rejected up front; otherwise every byte pair is
/// XORed and the results OR-folded, so the position of the first difference
/// is not observable.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
