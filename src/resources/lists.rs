//! The contact lists API.

use crate::engine::{ApiError, Jitter, RandomJitter, RequestEngine, RequestSpec};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

use super::models::{Contact, ContactList, CreateListData, PaginatedResponse, UpdateListData};
use super::params::{ListListsParams, PaginationParams, QueryParams};
use super::{item_path, json_body};

const BASE_PATH: &str = "/api/v1/lists";

/// Operations on `/api/v1/lists`.
#[derive(Debug)]
pub struct Lists<'a, H = ReqwestClient, S = TokioSleeper, J = RandomJitter> {
    engine: &'a RequestEngine<H, S, J>,
}

impl<'a, H, S, J> Lists<'a, H, S, J> {
    pub(crate) const fn new(engine: &'a RequestEngine<H, S, J>) -> Self {
        Self { engine }
    }
}

impl<H: HttpClient, S: Sleeper, J: Jitter> Lists<'_, H, S, J> {
    /// Lists one page of contact lists.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn list(
        &self,
        params: &ListListsParams,
    ) -> Result<PaginatedResponse<ContactList>, ApiError> {
        self.engine
            .execute(&params.apply(RequestSpec::get(BASE_PATH)))
            .await
    }

    /// Fetches one list.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn get(&self, id: &str) -> Result<ContactList, ApiError> {
        self.engine
            .execute(&RequestSpec::get(item_path(BASE_PATH, id)))
            .await
    }

    /// Creates a list.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn create(&self, data: &CreateListData) -> Result<ContactList, ApiError> {
        let spec = RequestSpec::post(BASE_PATH).json(json_body(data)?);
        self.engine.execute(&spec).await
    }

    /// Renames a list or changes its description.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn update(&self, id: &str, data: &UpdateListData) -> Result<ContactList, ApiError> {
        let spec = RequestSpec::patch(item_path(BASE_PATH, id)).json(json_body(data)?);
        self.engine.execute(&spec).await
    }

    /// Deletes a list. The contacts themselves are kept.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.engine
            .execute_discarding_body(&RequestSpec::delete(item_path(BASE_PATH, id)))
            .await
    }

    /// Lists one page of the contacts in a list.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn list_contacts(
        &self,
        list_id: &str,
        page: &PaginationParams,
    ) -> Result<PaginatedResponse<Contact>, ApiError> {
        self.engine
            .execute(&page.apply(RequestSpec::get(members_path(list_id))))
            .await
    }

    /// Adds contacts to a list by id.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn add_contacts(&self, list_id: &str, contact_ids: &[&str]) -> Result<(), ApiError> {
        let spec = RequestSpec::post(members_path(list_id))
            .json(serde_json::json!({ "contactIds": contact_ids }));
        self.engine.execute_discarding_body(&spec).await
    }

    /// Removes contacts from a list by id.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn remove_contacts(
        &self,
        list_id: &str,
        contact_ids: &[&str],
    ) -> Result<(), ApiError> {
        let spec = RequestSpec::delete(members_path(list_id))
            .json(serde_json::json!({ "contactIds": contact_ids }));
        self.engine.execute_discarding_body(&spec).await
    }
}

fn members_path(list_id: &str) -> String {
    format!("{}/contacts", item_path(BASE_PATH, list_id))
}
