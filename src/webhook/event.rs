//! The verified webhook event.

use serde::{Deserialize, Serialize};

/// An authenticated event delivered by Lystica Cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Unique event identifier
    pub id: String,

    /// Event type, e.g. `contact.created`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event-specific payload
    pub data: serde_json::Value,

    /// Creation time as sent by the server (ISO 8601)
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl WebhookEvent {
    /// Deserializes `data` into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `data` does not match `T`.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}
