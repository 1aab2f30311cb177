//! The request engine: auth, timeouts, retries and error mapping.

use std::fmt;
use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use http::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient};

use super::{
    ApiError, ErrorBody, Jitter, NetworkError, RandomJitter, RequestSpec, RetryPolicy,
};

/// Version reported in the client identification headers.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value of the `User-Agent` header sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("lystica-cloud-rust/", env!("CARGO_PKG_VERSION"));

/// Name of the header carrying the bare SDK version.
pub const SDK_VERSION_HEADER: &str = "x-sdk-version";

/// Statuses worth retrying: 408, 502, 503 and 504.
#[must_use]
pub const fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 502 | 503 | 504)
}

/// Outcome of a single attempt, consumed by the retry loop.
#[derive(Debug)]
enum Attempt {
    Success(HttpResponse),
    Retryable(ApiError),
    Terminal(ApiError),
}

fn classify_transport(error: HttpError) -> Attempt {
    match error {
        HttpError::Timeout => Attempt::Retryable(NetworkError::Timeout.into()),
        HttpError::Connection(source) => {
            Attempt::Retryable(NetworkError::Connection(source.to_string()).into())
        }
        HttpError::InvalidUrl(reason) => Attempt::Terminal(ApiError::InvalidRequest(reason)),
    }
}

/// Executes logical API calls against a base address.
///
/// Each call is authenticated with a bearer API key, bounded by a
/// per-attempt timeout, and retried with exponential backoff on 408, 502,
/// 503, 504 and transport failures. Everything else surfaces immediately as a
/// typed [`ApiError`].
///
/// The engine holds only immutable configuration, so one instance can serve
/// any number of concurrent calls.
///
/// # Type Parameters
///
/// - `H`: the transport
/// - `S`: the sleeper used between retries (defaults to [`TokioSleeper`])
/// - `J`: the jitter source (defaults to [`RandomJitter`])
///
/// # Example
///
/// ```no_run
/// use lystica_cloud::config::ClientConfig;
/// use lystica_cloud::engine::{RequestEngine, RequestSpec};
/// use lystica_cloud::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), lystica_cloud::engine::ApiError> {
/// let config = ClientConfig::new("lys_test_abc123");
/// let engine = RequestEngine::new(ReqwestClient::new(), &config);
///
/// let info: serde_json::Value = engine
///     .execute(&RequestSpec::get("/api/v1/auth/verify"))
///     .await?;
/// println!("{info}");
/// # Ok(())
/// # }
/// ```
pub struct RequestEngine<H = ReqwestClient, S = TokioSleeper, J = RandomJitter> {
    client: H,
    sleeper: S,
    jitter: J,
    api_key: String,
    base_url: String,
    /// `base_url` parsed once; a parse failure surfaces on the first request.
    base: Result<Url, url::ParseError>,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl<H: fmt::Debug, S: fmt::Debug, J: fmt::Debug> fmt::Debug for RequestEngine<H, S, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEngine")
            .field("client", &self.client)
            .field("sleeper", &self.sleeper)
            .field("jitter", &self.jitter)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl<H> RequestEngine<H, TokioSleeper, RandomJitter> {
    /// Creates an engine from a client configuration.
    ///
    /// Trailing slashes are stripped from the base address. Nothing else is
    /// validated here; see [`ClientConfig::validate`].
    #[must_use]
    pub fn new(client: H, config: &ClientConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            client,
            sleeper: TokioSleeper,
            jitter: RandomJitter,
            api_key: config.api_key.clone(),
            base: Url::parse(&base_url),
            base_url,
            timeout: config.timeout,
            retry_policy: RetryPolicy::new().with_max_retries(config.max_retries),
        }
    }
}

impl<H, S, J> RequestEngine<H, S, J> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RequestEngine<H, S2, J> {
        RequestEngine {
            client: self.client,
            sleeper,
            jitter: self.jitter,
            api_key: self.api_key,
            base_url: self.base_url,
            base: self.base,
            timeout: self.timeout,
            retry_policy: self.retry_policy,
        }
    }

    /// Replaces the jitter source.
    #[must_use]
    pub fn with_jitter<J2>(self, jitter: J2) -> RequestEngine<H, S, J2> {
        RequestEngine {
            client: self.client,
            sleeper: self.sleeper,
            jitter,
            api_key: self.api_key,
            base_url: self.base_url,
            base: self.base,
            timeout: self.timeout,
            retry_policy: self.retry_policy,
        }
    }

    /// Returns the normalized base address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Builds the wire request for `spec`: URL, headers and serialized body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the URL or auth header cannot be
    /// built, or [`ApiError::Encode`] if the body cannot be serialized.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
        let base = self
            .base
            .as_ref()
            .map_err(|e| ApiError::InvalidRequest(format!("base URL '{}': {e}", self.base_url)))?;
        let url = spec
            .build_url(base)
            .map_err(|e| ApiError::InvalidRequest(format!("path '{}': {e}", spec.path())))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| ApiError::InvalidRequest("API key is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut request = HttpRequest::new(spec.method().clone(), url)
            .with_header(AUTHORIZATION, auth)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
            .with_header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .with_header(
                HeaderName::from_static(SDK_VERSION_HEADER),
                HeaderValue::from_static(SDK_VERSION),
            );

        if let Some(body) = spec.body() {
            request.body = Some(serde_json::to_vec(body).map_err(ApiError::Encode)?);
        }

        Ok(request)
    }
}

impl<H: HttpClient, S: Sleeper, J: Jitter> RequestEngine<H, S, J> {
    /// Executes `spec` and decodes the JSON response into `T`.
    ///
    /// A 204 response is never read; `T` is produced from JSON `null`, so use
    /// `()` or an `Option` for endpoints that answer with no content.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`ApiError`] once the call cannot succeed: a
    /// mapped error response, a network failure after the retry budget is
    /// spent, or a body that does not decode into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T, ApiError> {
        let response = self.send(spec).await?;

        let decoded = if response.status == StatusCode::NO_CONTENT {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&response.body)
        };

        decoded.map_err(|source| ApiError::Decode {
            status: response.status,
            source,
        })
    }

    /// Executes `spec` and ignores whatever body a successful response has.
    ///
    /// # Errors
    ///
    /// Same as [`RequestEngine::execute`], minus decoding failures.
    pub async fn execute_discarding_body(&self, spec: &RequestSpec) -> Result<(), ApiError> {
        self.send(spec).await.map(drop)
    }

    /// Executes `spec` with retries and returns the raw successful response.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`ApiError`] for the call.
    pub async fn send(&self, spec: &RequestSpec) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(spec)?;
        let mut pending: Option<ApiError> = None;

        for attempt in 0..self.retry_policy.max_attempts() {
            match self.attempt(&request, attempt).await {
                Attempt::Success(response) => return Ok(response),
                Attempt::Terminal(error) => return Err(error),
                Attempt::Retryable(error) => {
                    if !self.retry_policy.should_retry(attempt) {
                        pending = Some(error);
                        break;
                    }

                    let delay = self.retry_policy.backoff(attempt, &self.jitter);
                    tracing::warn!(
                        request = %spec,
                        attempt,
                        delay = ?delay,
                        error = %error,
                        "Transient failure, retrying"
                    );
                    pending = Some(error);
                    self.sleeper.sleep(delay).await;
                }
            }
        }

        Err(pending.unwrap_or(ApiError::Network(NetworkError::RetriesExhausted)))
    }

    /// Runs one attempt under a fresh deadline and classifies the result.
    async fn attempt(&self, request: &HttpRequest, attempt: u32) -> Attempt {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            attempt,
            "Sending API request"
        );

        // Dropping the in-flight future when the deadline fires aborts it.
        let outcome = tokio::time::timeout(self.timeout, self.client.request(request.clone())).await;

        let response = match outcome {
            Err(_elapsed) => return Attempt::Retryable(NetworkError::Timeout.into()),
            Ok(Err(error)) => return classify_transport(error),
            Ok(Ok(response)) => response,
        };

        if response.is_success() {
            tracing::debug!(status = %response.status, attempt, "API request succeeded");
            return Attempt::Success(response);
        }

        let body = ErrorBody::parse(response.status, &response.body);
        let error = ApiError::from_response(response.status, body);

        if is_retryable_status(response.status) {
            Attempt::Retryable(error)
        } else {
            tracing::debug!(status = %response.status, error = %error, "API request failed");
            Attempt::Terminal(error)
        }
    }
}
