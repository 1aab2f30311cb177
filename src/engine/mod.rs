//! Resilient request engine.
//!
//! Turns a logical API call ([`RequestSpec`]) into an authenticated HTTP
//! request and drives it to a terminal outcome:
//!
//! - URL construction with absent/empty query parameters omitted
//! - bearer auth and client identification headers
//! - a fresh timeout per attempt
//! - retries with exponential backoff and jitter ([`RetryPolicy`], [`Jitter`])
//!   on 408/502/503/504 and transport failures
//! - mapping of error responses to [`ApiError`]

mod error;
mod executor;
mod retry;
mod spec;


pub use error::{ApiError, ApiFailure, ErrorBody, ErrorKind, NetworkError};
pub use executor::{
    RequestEngine, SDK_VERSION, SDK_VERSION_HEADER, USER_AGENT_VALUE, is_retryable_status,
};
pub use retry::{Jitter, NoJitter, RandomJitter, RetryPolicy};
pub use spec::{QueryValue, RequestSpec};
