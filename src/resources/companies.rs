//! The companies API.

use futures_util::Stream;

use crate::engine::{ApiError, Jitter, RandomJitter, RequestEngine, RequestSpec};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

use super::item_path;
use super::models::{Company, Contact, PaginatedResponse};
use super::pagination::paginate;
use super::params::{ListCompaniesParams, PaginationParams, QueryParams};

const BASE_PATH: &str = "/api/v1/companies";

/// Read-only operations on `/api/v1/companies`.
#[derive(Debug)]
pub struct Companies<'a, H = ReqwestClient, S = TokioSleeper, J = RandomJitter> {
    engine: &'a RequestEngine<H, S, J>,
}

impl<'a, H, S, J> Companies<'a, H, S, J> {
    pub(crate) const fn new(engine: &'a RequestEngine<H, S, J>) -> Self {
        Self { engine }
    }
}

impl<'a, H: HttpClient, S: Sleeper, J: Jitter> Companies<'a, H, S, J> {
    /// Lists one page of companies.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn list(
        &self,
        params: &ListCompaniesParams,
    ) -> Result<PaginatedResponse<Company>, ApiError> {
        self.engine
            .execute(&params.apply(RequestSpec::get(BASE_PATH)))
            .await
    }

    /// Fetches one company.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn get(&self, id: &str) -> Result<Company, ApiError> {
        self.engine
            .execute(&RequestSpec::get(item_path(BASE_PATH, id)))
            .await
    }

    /// Lists companies matching a name or domain.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn search(
        &self,
        query: &str,
        params: &ListCompaniesParams,
    ) -> Result<PaginatedResponse<Company>, ApiError> {
        let params = ListCompaniesParams {
            search: Some(query.to_string()),
            ..params.clone()
        };
        self.list(&params).await
    }

    /// Lists one page of the contacts working at a company.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the call.
    pub async fn list_contacts(
        &self,
        company_id: &str,
        page: &PaginationParams,
    ) -> Result<PaginatedResponse<Contact>, ApiError> {
        let path = format!("{}/contacts", item_path(BASE_PATH, company_id));
        self.engine.execute(&page.apply(RequestSpec::get(path))).await
    }

    /// Streams every company matching `params`, across all pages.
    pub fn list_all(
        &self,
        params: &ListCompaniesParams,
    ) -> impl Stream<Item = Result<Company, ApiError>> + use<'a, H, S, J> {
        paginate(self.engine, params.apply(RequestSpec::get(BASE_PATH)))
    }
}
