//! Tests for the emails API.

use super::test_fixtures::{MockApi, body_of, client, email_json, no_content, ok, page, query_of};
use super::{EmailStatus, ListEmailsParams, SendEmailData};
use http::Method;
use serde_json::json;

mod send {
    use super::*;

    #[tokio::test]
    async fn single_recipient_is_sent_as_array() {
        let api = MockApi::new(vec![ok(&email_json("eml_1", "queued"))]);
        let data = SendEmailData::new("jane@example.com", "team@acme.test", "Hello")
            .with_html("<p>Hi</p>");

        let email = client(&api).emails().send(&data).await.unwrap();

        assert_eq!(email.status, EmailStatus::Queued);
        let request = api.only_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.path(), "/api/v1/emails");
        assert_eq!(
            body_of(&request),
            json!({
                "to": ["jane@example.com"],
                "from": "team@acme.test",
                "subject": "Hello",
                "html": "<p>Hi</p>"
            })
        );
    }

    #[tokio::test]
    async fn recipient_list_is_kept() {
        let api = MockApi::new(vec![ok(&email_json("eml_1", "queued"))]);
        let data = SendEmailData {
            scheduled_at: Some("2024-06-01T09:00:00Z".into()),
            ..SendEmailData::new(vec!["a@x.test", "b@x.test"], "team@acme.test", "Hi")
        }
        .with_text("Hi");

        client(&api).emails().send(&data).await.unwrap();

        let body = body_of(&api.only_request());
        assert_eq!(body["to"], json!(["a@x.test", "b@x.test"]));
        assert_eq!(body["scheduledAt"], "2024-06-01T09:00:00Z");
        assert_eq!(body["text"], "Hi");
        assert!(body.get("html").is_none());
    }
}

#[tokio::test]
async fn get_decodes_status() {
    let api = MockApi::new(vec![ok(&email_json("eml_9", "delivered"))]);

    let email = client(&api).emails().get("eml_9").await.unwrap();

    assert_eq!(email.status, EmailStatus::Delivered);
    assert_eq!(email.to, vec!["jane@example.com"]);
    assert_eq!(api.only_request().url.path(), "/api/v1/emails/eml_9");
}

#[tokio::test]
async fn list_sends_status_and_list_id() {
    let api = MockApi::new(vec![ok(&page(vec![email_json("eml_1", "bounced")], None))]);
    let params = ListEmailsParams {
        status: Some(EmailStatus::Bounced),
        list_id: Some("lst_3".into()),
        ..Default::default()
    };

    let result = client(&api).emails().list(&params).await.unwrap();

    assert_eq!(result.data[0].status, EmailStatus::Bounced);
    assert_eq!(
        query_of(&api.only_request()),
        vec![
            ("status".to_string(), "bounced".to_string()),
            ("listId".to_string(), "lst_3".to_string()),
        ]
    );
}

#[tokio::test]
async fn cancel_posts_to_cancel_path() {
    let api = MockApi::new(vec![no_content()]);

    client(&api).emails().cancel("eml_1").await.unwrap();

    let request = api.only_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/api/v1/emails/eml_1/cancel");
    assert!(request.body.is_none());
}
