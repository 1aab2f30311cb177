//! Typed failures surfaced by the request engine.

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Parsed shape of a non-2xx response payload.
///
/// The API answers errors with `{"error": "...", "message": "...", "code": "..."}`.
/// Any of the fields may be missing from a JSON body; a missing `error` is
/// filled with `HTTP <status>` while `message` and `code` stay as sent. Bodies
/// that are not a JSON object are replaced by a synthetic
/// `{"error": "HTTP <status>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Short error identifier or description
    pub error: String,
    /// Human-readable explanation
    pub message: Option<String>,
    /// Machine-readable error code
    pub code: Option<String>,
}

/// Wire form of [`ErrorBody`], every field optional.
#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorBody {
    /// Parses an error payload, filling a missing `error` with `HTTP <status>`.
    #[must_use]
    pub fn parse(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<RawErrorBody>(body) {
            Ok(raw) => Self {
                error: raw.error.unwrap_or_else(|| status_label(status)),
                message: raw.message,
                code: raw.code,
            },
            Err(_) => Self::synthetic(status),
        }
    }

    /// The body used when the server's payload cannot be parsed.
    #[must_use]
    pub fn synthetic(status: StatusCode) -> Self {
        Self {
            error: status_label(status),
            message: None,
            code: None,
        }
    }
}

fn status_label(status: StatusCode) -> String {
    format!("HTTP {}", status.as_u16())
}

/// Details of an error response from the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (HTTP {}, code: {code})", .status.as_u16())]
pub struct ApiFailure {
    /// HTTP status of the response
    pub status: StatusCode,
    /// `code` from the body, or `error` when no code was sent
    pub code: String,
    /// `message` from the body, or `error` when no message was sent
    pub message: String,
}

impl ApiFailure {
    /// Builds failure details from a status and parsed error body.
    #[must_use]
    pub fn new(status: StatusCode, body: ErrorBody) -> Self {
        let code = body.code.unwrap_or_else(|| body.error.clone());
        let message = body.message.unwrap_or(body.error);
        Self {
            status,
            code,
            message,
        }
    }
}

/// Transport-level failures, after classification by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The per-attempt deadline fired and the in-flight request was dropped.
    #[error("Request timed out")]
    Timeout,

    /// DNS, connection or body-read failure.
    #[error("Network error: {0}")]
    Connection(String),

    /// Every attempt failed without a more specific error being recorded.
    #[error("Request failed after retries")]
    RetriesExhausted,
}

/// Coarse classification of an [`ApiError`] for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401
    Auth,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 422
    Validation,
    /// 429
    RateLimit,
    /// Any other non-2xx status
    Api,
    /// Timeout, connection failure, or exhausted retries
    Network,
    /// The request could not be built or serialized
    Request,
    /// A 2xx body did not match the expected shape
    Decode,
}

/// Terminal failure of a logical API call.
///
/// Every variant is inspectable: match on it, or use [`ApiError::kind`],
/// [`ApiError::status`] and [`ApiError::code`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: the API key is missing, malformed or revoked.
    #[error("Authentication failed: {0}")]
    Auth(ApiFailure),

    /// 403: the key lacks the scope for this operation.
    #[error("Forbidden: {0}")]
    Forbidden(ApiFailure),

    /// 404: the resource does not exist.
    #[error("Not found: {0}")]
    NotFound(ApiFailure),

    /// 422: the request body failed server-side validation.
    #[error("Validation failed: {0}")]
    Validation(ApiFailure),

    /// 429: too many requests.
    #[error("Rate limit exceeded: {0}")]
    RateLimit(ApiFailure),

    /// Any other non-2xx response.
    #[error("API error: {0}")]
    Api(ApiFailure),

    /// The request never produced a response.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The request body could not be serialized. Raised before any I/O.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The URL or headers could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A successful response carried a body of the wrong shape.
    #[error("Failed to decode response body (HTTP {}): {source}", .status.as_u16())]
    Decode {
        /// Status of the successful response
        status: StatusCode,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Maps an error response to its typed variant.
    #[must_use]
    pub fn from_response(status: StatusCode, body: ErrorBody) -> Self {
        let failure = ApiFailure::new(status, body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Auth(failure),
            StatusCode::FORBIDDEN => Self::Forbidden(failure),
            StatusCode::NOT_FOUND => Self::NotFound(failure),
            StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(failure),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(failure),
            _ => Self::Api(failure),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(_) => ErrorKind::Auth,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Api(_) => ErrorKind::Api,
            Self::Network(_) => ErrorKind::Network,
            Self::Encode(_) | Self::InvalidRequest(_) => ErrorKind::Request,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Returns the API failure details for error responses.
    #[must_use]
    pub const fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Self::Auth(f)
            | Self::Forbidden(f)
            | Self::NotFound(f)
            | Self::Validation(f)
            | Self::RateLimit(f)
            | Self::Api(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            other => other.failure().map(|f| f.status),
        }
    }

    /// Returns the API error code, for error responses.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.failure().map(|f| f.code.as_str())
    }

    /// Returns true for failures that never reached a response.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
