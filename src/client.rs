//! The top-level Lystica Cloud client.

use std::fmt;
use std::sync::Arc;

use crate::config::{ClientConfig, ConfigError};
use crate::engine::{ApiError, Jitter, RandomJitter, RequestEngine, RequestSpec};
use crate::resources::{ApiKeyInfo, Companies, Contacts, Emails, Lists};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

const VERIFY_KEY_PATH: &str = "/api/v1/auth/verify";

/// Entry point to the Lystica Cloud API.
///
/// Cloning is cheap: clones share one [`RequestEngine`].
///
/// # Example
///
/// ```no_run
/// use lystica_cloud::LysticaCloud;
/// use lystica_cloud::config::ClientConfig;
/// use lystica_cloud::resources::ListContactsParams;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let lystica = LysticaCloud::new(ClientConfig::new("lys_live_abc123"))?;
///
/// let params = ListContactsParams {
///     industry: Some("Finance".into()),
///     limit: Some(50),
///     ..Default::default()
/// };
/// let page = lystica.contacts().list(&params).await?;
/// println!("{} of {} contacts", page.data.len(), page.meta.total);
/// # Ok(())
/// # }
/// ```
pub struct LysticaCloud<H = ReqwestClient, S = TokioSleeper, J = RandomJitter> {
    engine: Arc<RequestEngine<H, S, J>>,
}

impl<H, S, J> Clone for LysticaCloud<H, S, J> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<H: fmt::Debug, S: fmt::Debug, J: fmt::Debug> fmt::Debug for LysticaCloud<H, S, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LysticaCloud")
            .field("engine", &self.engine)
            .finish()
    }
}

impl LysticaCloud {
    /// Validates `config` and builds a client over the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the API key, base URL or timeout is invalid.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(base_url = %config.base_url, "Creating Lystica Cloud client");
        Ok(Self::with_engine(RequestEngine::new(
            ReqwestClient::new(),
            &config,
        )))
    }
}

impl<H, S, J> LysticaCloud<H, S, J> {
    /// Wraps an already built engine, e.g. one with a custom transport.
    ///
    /// No validation is performed.
    #[must_use]
    pub fn with_engine(engine: RequestEngine<H, S, J>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns the underlying request engine.
    #[must_use]
    pub fn engine(&self) -> &RequestEngine<H, S, J> {
        &self.engine
    }

    /// Access the contacts API.
    #[must_use]
    pub fn contacts(&self) -> Contacts<'_, H, S, J> {
        Contacts::new(&self.engine)
    }

    /// Access the companies API.
    #[must_use]
    pub fn companies(&self) -> Companies<'_, H, S, J> {
        Companies::new(&self.engine)
    }

    /// Access the emails API.
    #[must_use]
    pub fn emails(&self) -> Emails<'_, H, S, J> {
        Emails::new(&self.engine)
    }

    /// Access the lists API.
    #[must_use]
    pub fn lists(&self) -> Lists<'_, H, S, J> {
        Lists::new(&self.engine)
    }
}

impl<H: HttpClient, S: Sleeper, J: Jitter> LysticaCloud<H, S, J> {
    /// Checks the API key and returns its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] for an invalid or revoked key, or the call's
    /// other errors.
    pub async fn verify_key(&self) -> Result<ApiKeyInfo, ApiError> {
        self.engine.execute(&RequestSpec::get(VERIFY_KEY_PATH)).await
    }
}
