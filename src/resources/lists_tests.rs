//! Tests for the lists API.

use super::test_fixtures::{
    MockApi, body_of, client, contact_json, list_json, no_content, ok, page, query_of,
};
use super::{CreateListData, ListListsParams, PaginationParams, UpdateListData};
use http::Method;
use serde_json::json;

#[tokio::test]
async fn list_sends_search() {
    let api = MockApi::new(vec![ok(&page(vec![list_json("lst_1")], None))]);
    let params = ListListsParams {
        search: Some("leads".into()),
        ..Default::default()
    };

    let result = client(&api).lists().list(&params).await.unwrap();

    assert_eq!(result.data[0].name, "Enterprise Leads");
    let request = api.only_request();
    assert_eq!(request.url.path(), "/api/v1/lists");
    assert_eq!(
        query_of(&request),
        vec![("search".to_string(), "leads".to_string())]
    );
}

#[tokio::test]
async fn get_targets_item_path() {
    let api = MockApi::new(vec![ok(&list_json("lst_1"))]);

    let list = client(&api).lists().get("lst_1").await.unwrap();

    assert_eq!(list.contact_count, 3);
    assert_eq!(api.only_request().url.path(), "/api/v1/lists/lst_1");
}

#[tokio::test]
async fn create_omits_unset_description() {
    let api = MockApi::new(vec![ok(&list_json("lst_new"))]);
    let data = CreateListData {
        name: "Enterprise Leads".into(),
        description: None,
    };

    client(&api).lists().create(&data).await.unwrap();

    let request = api.only_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(body_of(&request), json!({ "name": "Enterprise Leads" }));
}

#[tokio::test]
async fn update_patches_item() {
    let api = MockApi::new(vec![ok(&list_json("lst_1"))]);
    let data = UpdateListData {
        description: Some("Q3 targets".into()),
        ..Default::default()
    };

    client(&api).lists().update("lst_1", &data).await.unwrap();

    let request = api.only_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.url.path(), "/api/v1/lists/lst_1");
    assert_eq!(body_of(&request), json!({ "description": "Q3 targets" }));
}

#[tokio::test]
async fn delete_sends_delete() {
    let api = MockApi::new(vec![no_content()]);

    client(&api).lists().delete("lst_1").await.unwrap();

    let request = api.only_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url.path(), "/api/v1/lists/lst_1");
}

mod members {
    use super::*;

    #[tokio::test]
    async fn list_contacts_pages_members() {
        let api = MockApi::new(vec![ok(&page(vec![contact_json("cnt_1")], None))]);

        let result = client(&api)
            .lists()
            .list_contacts("lst_1", &PaginationParams::default())
            .await
            .unwrap();

        assert_eq!(result.data.len(), 1);
        let request = api.only_request();
        assert_eq!(request.url.path(), "/api/v1/lists/lst_1/contacts");
        assert_eq!(request.url.query(), None);
    }

    #[tokio::test]
    async fn add_contacts_posts_ids() {
        let api = MockApi::new(vec![ok(&json!({ "added": 2 }))]);

        client(&api)
            .lists()
            .add_contacts("lst_1", &["cnt_1", "cnt_2"])
            .await
            .unwrap();

        let request = api.only_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.path(), "/api/v1/lists/lst_1/contacts");
        assert_eq!(
            body_of(&request),
            json!({ "contactIds": ["cnt_1", "cnt_2"] })
        );
    }

    #[tokio::test]
    async fn remove_contacts_deletes_ids() {
        let api = MockApi::new(vec![no_content()]);

        client(&api)
            .lists()
            .remove_contacts("lst_1", &["cnt_2"])
            .await
            .unwrap();

        let request = api.only_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(body_of(&request), json!({ "contactIds": ["cnt_2"] }));
    }
}
