//! Verification of signed webhook deliveries.
//!
//! This module provides:
//! - Signature verification and event parsing ([`WebhookVerifier`])
//! - The verified event shape ([`WebhookEvent`])
//! - Signature primitives ([`compute_signature`], [`constant_time_eq`])
//! - Error types ([`WebhookError`])
//!
//! Lystica Cloud signs each delivery with HMAC-SHA256 over
//! `"<timestamp>.<raw body>"` and sends the lowercase hex digest in
//! `x-lystica-signature`, with the Unix timestamp in `x-lystica-timestamp`.

mod error;
mod event;
mod signature;
mod verifier;


pub use error::WebhookError;
pub use event::WebhookEvent;
pub use signature::{compute_signature, constant_time_eq};
pub use verifier::{DEFAULT_TOLERANCE, SIGNATURE_HEADER, TIMESTAMP_HEADER, WebhookVerifier};
