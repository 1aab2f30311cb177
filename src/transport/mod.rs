//! Transport layer: the raw HTTP exchange underneath the request engine.
//!
//! This module provides:
//! - Request and response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction the engine is generic over ([`HttpClient`])
//! - The production implementation backed by reqwest ([`ReqwestClient`])
//!
//! Nothing here knows about retries, authentication or the API's error
//! bodies; those live in [`crate::engine`].

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
