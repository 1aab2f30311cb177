//! The contacts API.

use futures_util::Stream;

use crate::engine::{ApiError, Jitter, RandomJitter, RequestEngine, RequestSpec};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

use super::models::{Contact, CreateContactData, PaginatedResponse, UpdateContactData};
use super::pagination::paginate;
use super::params::{ListContactsParams, QueryParams};
use super::{item_path, json_body};

const BASE_PATH: &str = "/api/v1/contacts";

/// Operations on `/api/v1/contacts`.
///
/// Obtained from [`LysticaCloud::contacts`](crate::LysticaCloud::contacts).
#[derive(Debug)]
pub struct Contacts<'a, H = ReqwestClient, S = TokioSleeper, J = RandomJitter> {
    engine: &'a RequestEngine<H, S, J>,
}

impl<'a, H, S, J> Contacts<'a, H, S, J> {
    pub(crate) const fn new(engine: &'a RequestEngine<H, S, J>) -> Self {
        Self { engine }
    }
}

impl<'a, H: HttpClient, S: Sleeper, J: Jitter> Contacts<'a, H, S, J> {
    /// Lists one page of contacts.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn list(
        &self,
        params: &ListContactsParams,
    ) -> Result<PaginatedResponse<Contact>, ApiError> {
        self.engine
            .execute(&params.apply(RequestSpec::get(BASE_PATH)))
            .await
    }

    /// Fetches one contact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or the call's other errors.
    pub async fn get(&self, id: &str) -> Result<Contact, ApiError> {
        self.engine
            .execute(&RequestSpec::get(item_path(BASE_PATH, id)))
            .await
    }

    /// Creates a contact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for rejected fields, or the call's other errors.
    pub async fn create(&self, data: &CreateContactData) -> Result<Contact, ApiError> {
        let spec = RequestSpec::post(BASE_PATH).json(json_body(data)?);
        self.engine.execute(&spec).await
    }

    /// Updates the fields set in `data`.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn update(&self, id: &str, data: &UpdateContactData) -> Result<Contact, ApiError> {
        let spec = RequestSpec::patch(item_path(BASE_PATH, id)).json(json_body(data)?);
        self.engine.execute(&spec).await
    }

    /// Deletes a contact.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.engine
            .execute_discarding_body(&RequestSpec::delete(item_path(BASE_PATH, id)))
            .await
    }

    /// Lists contacts matching a free-text query.
    ///
    /// Same as [`Contacts::list`] with `search` set; any `search` in `params`
    /// is replaced.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn search(
        &self,
        query: &str,
        params: &ListContactsParams,
    ) -> Result<PaginatedResponse<Contact>, ApiError> {
        let params = ListContactsParams {
            search: Some(query.to_string()),
            ..params.clone()
        };
        self.list(&params).await
    }

    /// Adds tags to a contact and returns the updated contact.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn add_tags(&self, id: &str, tags: &[&str]) -> Result<Contact, ApiError> {
        let spec = RequestSpec::post(format!("{}/tags", item_path(BASE_PATH, id)))
            .json(serde_json::json!({ "tags": tags }));
        self.engine.execute(&spec).await
    }

    /// Removes tags from a contact and returns the updated contact.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn remove_tags(&self, id: &str, tags: &[&str]) -> Result<Contact, ApiError> {
        let spec = RequestSpec::delete(format!("{}/tags", item_path(BASE_PATH, id)))
            .json(serde_json::json!({ "tags": tags }));
        self.engine.execute(&spec).await
    }

    /// Streams every contact matching `params`, across all pages.
    ///
    /// `limit` and `cursor` in `params` are overridden.
    pub fn list_all(
        &self,
        params: &ListContactsParams,
    ) -> impl Stream<Item = Result<Contact, ApiError>> + use<'a, H, S, J> {
        paginate(self.engine, params.apply(RequestSpec::get(BASE_PATH)))
    }
}
