//! Query parameters for listing endpoints.
//!
//! Unset fields become absent query values and never reach the wire.

use crate::engine::{QueryValue, RequestSpec};

use super::models::EmailStatus;

/// Converts a parameter struct into query pairs.
pub trait QueryParams {
    /// Returns every parameter, unset ones as [`QueryValue::Absent`].
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)>;

    /// Applies the parameters to `spec`.
    #[must_use]
    fn apply(&self, spec: RequestSpec) -> RequestSpec {
        spec.query_pairs(self.query_pairs())
    }
}

/// Page size and cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// Items per page (1-200; the server defaults to 50)
    pub limit: Option<u32>,
    /// Cursor from the previous page's `meta.cursor`
    pub cursor: Option<String>,
}

impl QueryParams for PaginationParams {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        vec![
            ("limit", self.limit.into()),
            ("cursor", self.cursor.clone().into()),
        ]
    }
}

/// Filters for listing contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContactsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub company: Option<String>,
    pub seniority: Option<String>,
    pub tag: Option<String>,
    /// Free-text search
    pub search: Option<String>,
}

impl QueryParams for ListContactsParams {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        vec![
            ("limit", self.limit.into()),
            ("cursor", self.cursor.clone().into()),
            ("industry", self.industry.clone().into()),
            ("country", self.country.clone().into()),
            ("company", self.company.clone().into()),
            ("seniority", self.seniority.clone().into()),
            ("tag", self.tag.clone().into()),
            ("search", self.search.clone().into()),
        ]
    }
}

/// Filters for listing companies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCompaniesParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    /// Size band, e.g. `51-200`
    pub size: Option<String>,
    /// Name or domain search
    pub search: Option<String>,
}

impl QueryParams for ListCompaniesParams {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        vec![
            ("limit", self.limit.into()),
            ("cursor", self.cursor.clone().into()),
            ("industry", self.industry.clone().into()),
            ("country", self.country.clone().into()),
            ("size", self.size.clone().into()),
            ("search", self.search.clone().into()),
        ]
    }
}

/// Filters for listing emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEmailsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub status: Option<EmailStatus>,
    pub list_id: Option<String>,
}

impl QueryParams for ListEmailsParams {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        vec![
            ("limit", self.limit.into()),
            ("cursor", self.cursor.clone().into()),
            ("status", self.status.map(EmailStatus::as_str).into()),
            ("listId", self.list_id.clone().into()),
        ]
    }
}

/// Filters for listing contact lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListListsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub search: Option<String>,
}

impl QueryParams for ListListsParams {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        vec![
            ("limit", self.limit.into()),
            ("cursor", self.cursor.clone().into()),
            ("search", self.search.clone().into()),
        ]
    }
}
