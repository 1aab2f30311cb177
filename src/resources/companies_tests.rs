//! Tests for the companies API.

use super::test_fixtures::{MockApi, client, company_json, contact_json, ok, page, query_of};
use super::{ListCompaniesParams, PaginationParams};
use http::Method;

#[tokio::test]
async fn list_sends_filters() {
    let api = MockApi::new(vec![ok(&page(vec![company_json("cmp_1")], Some("c2")))]);
    let params = ListCompaniesParams {
        industry: Some("Software".into()),
        size: Some("51-200".into()),
        ..Default::default()
    };

    let result = client(&api).companies().list(&params).await.unwrap();

    assert_eq!(result.data[0].founded_year, Some(1999));
    assert_eq!(result.meta.next_cursor(), Some("c2"));
    let request = api.only_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.path(), "/api/v1/companies");
    assert_eq!(
        query_of(&request),
        vec![
            ("industry".to_string(), "Software".to_string()),
            ("size".to_string(), "51-200".to_string()),
        ]
    );
}

#[tokio::test]
async fn get_targets_item_path() {
    let api = MockApi::new(vec![ok(&company_json("cmp_7"))]);

    let company = client(&api).companies().get("cmp_7").await.unwrap();

    assert_eq!(company.id, "cmp_7");
    assert_eq!(company.contact_count, 12);
    assert_eq!(api.only_request().url.path(), "/api/v1/companies/cmp_7");
}

#[tokio::test]
async fn search_sets_search_param() {
    let api = MockApi::new(vec![ok(&page(vec![], None))]);

    client(&api)
        .companies()
        .search("acme", &ListCompaniesParams::default())
        .await
        .unwrap();

    assert_eq!(
        query_of(&api.only_request()),
        vec![("search".to_string(), "acme".to_string())]
    );
}

#[tokio::test]
async fn list_contacts_targets_nested_path() {
    let api = MockApi::new(vec![ok(&page(vec![contact_json("cnt_1")], None))]);
    let page_params = PaginationParams {
        limit: Some(25),
        cursor: Some("abc".into()),
    };

    let result = client(&api)
        .companies()
        .list_contacts("cmp_7", &page_params)
        .await
        .unwrap();

    assert_eq!(result.data[0].id, "cnt_1");
    let request = api.only_request();
    assert_eq!(request.url.path(), "/api/v1/companies/cmp_7/contacts");
    assert_eq!(
        query_of(&request),
        vec![
            ("limit".to_string(), "25".to_string()),
            ("cursor".to_string(), "abc".to_string()),
        ]
    );
}
