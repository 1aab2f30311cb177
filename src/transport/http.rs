//! HTTP request/response types and client trait.

use super::HttpError;

/// A fully built HTTP request, ready to hand to an [`HttpClient`].
///
/// Uses the `http` crate's method and header types so any client library can
/// consume it. The body is already serialized; `None` means the request is
/// sent without a body at all (not an empty one).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Absolute target URL, query string included
    pub url: url::Url,
    /// Headers to send
    pub headers: http::HeaderMap,
    /// Serialized body, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing values for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns the body as UTF-8 text, if there is one and it is valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|body| std::str::from_utf8(body).ok())
    }
}

/// A response received from the server, body fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a response with the given status and a JSON body.
    ///
    /// Mostly useful for mock clients.
    #[must_use]
    pub fn json(status: http::StatusCode, body: &serde_json::Value) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Self::new(status, headers, body.to_string().into_bytes())
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Trait for performing a single HTTP exchange.
///
/// The request engine is generic over this trait so tests can script
/// responses and failures, and so the underlying HTTP library can be swapped
/// without touching retry or error-mapping logic.
///
/// Implementations must not retry on their own.
///
/// # Example
///
/// ```ignore
/// use lystica_cloud::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the buffered response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful exchange at
    /// this level.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - The connection fails ([`HttpError::Connection`])
    /// - The client's own timeout fires ([`HttpError::Timeout`])
    /// - The request cannot be built ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
