//! Typed wrappers for the Lystica Cloud REST resources.
//!
//! Each resource borrows the client's [`RequestEngine`](crate::engine::RequestEngine)
//! and turns one method call into one engine call:
//! - [`Contacts`]: `/api/v1/contacts`
//! - [`Companies`]: `/api/v1/companies`
//! - [`Emails`]: `/api/v1/emails`
//! - [`Lists`]: `/api/v1/lists`
//!
//! Listing endpoints return one [`PaginatedResponse`] page; the `list_all`
//! methods stream every item across pages (see [`paginate`]).

mod companies;
mod contacts;
mod emails;
mod lists;
mod models;
mod pagination;
mod params;

#[cfg(test)]
mod companies_tests;
#[cfg(test)]
mod emails_tests;
#[cfg(test)]
mod lists_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use companies::Companies;
pub use contacts::Contacts;
pub use emails::Emails;
pub use lists::Lists;
pub use models::{
    ApiKeyInfo, Company, Contact, ContactList, CreateContactData, CreateListData, Email,
    EmailStatus, PageMeta, PaginatedResponse, Recipients, SendEmailData, UpdateContactData,
    UpdateListData,
};
pub use pagination::paginate;
pub use params::{
    ListCompaniesParams, ListContactsParams, ListEmailsParams, ListListsParams, PaginationParams,
    QueryParams,
};

use crate::engine::ApiError;

/// Path of one item under a collection.
fn item_path(base: &str, id: &str) -> String {
    format!("{base}/{id}")
}

/// Serializes a request body, before any network activity.
fn json_body<T: serde::Serialize>(data: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(data).map_err(ApiError::Encode)
}
