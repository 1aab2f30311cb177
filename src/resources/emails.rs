//! The emails API.

use crate::engine::{ApiError, Jitter, RandomJitter, RequestEngine, RequestSpec};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

use super::models::{Email, PaginatedResponse, SendEmailData};
use super::params::{ListEmailsParams, QueryParams};
use super::{item_path, json_body};

const BASE_PATH: &str = "/api/v1/emails";

/// Operations on `/api/v1/emails`.
#[derive(Debug)]
pub struct Emails<'a, H = ReqwestClient, S = TokioSleeper, J = RandomJitter> {
    engine: &'a RequestEngine<H, S, J>,
}

impl<'a, H, S, J> Emails<'a, H, S, J> {
    pub(crate) const fn new(engine: &'a RequestEngine<H, S, J>) -> Self {
        Self { engine }
    }
}

impl<H: HttpClient, S: Sleeper, J: Jitter> Emails<'_, H, S, J> {
    /// Sends an email, or schedules it when `scheduled_at` is set.
    ///
    /// A single recipient is sent as a one-element `to` array.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn send(&self, data: &SendEmailData) -> Result<Email, ApiError> {
        let spec = RequestSpec::post(BASE_PATH).json(json_body(data)?);
        self.engine.execute(&spec).await
    }

    /// Fetches an email and its delivery status.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn get(&self, id: &str) -> Result<Email, ApiError> {
        self.engine
            .execute(&RequestSpec::get(item_path(BASE_PATH, id)))
            .await
    }

    /// Lists one page of emails.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn list(&self, params: &ListEmailsParams) -> Result<PaginatedResponse<Email>, ApiError> {
        self.engine
            .execute(&params.apply(RequestSpec::get(BASE_PATH)))
            .await
    }

    /// Cancels a scheduled email that has not been sent yet.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn cancel(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/cancel", item_path(BASE_PATH, id));
        self.engine
            .execute_discarding_body(&RequestSpec::post(path))
            .await
    }
}
