//! Tests for transport request/response types.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

fn url() -> url::Url {
    url::Url::parse("https://api.lystica.cloud/api/v1/contacts").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_without_headers_or_body() {
        let req = HttpRequest::new(http::Method::PATCH, url());

        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(req.url, url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn get_and_post_set_method() {
        assert_eq!(HttpRequest::get(url()).method, http::Method::GET);
        assert_eq!(HttpRequest::post(url()).method, http::Method::POST);
    }

    #[test]
    fn with_body_sets_body() {
        let req = HttpRequest::post(url()).with_body(br#"{"email":"a@b.c"}"#.to_vec());

        assert_eq!(req.body_text(), Some(r#"{"email":"a@b.c"}"#));
    }

    #[test]
    fn with_header_replaces_existing_value() {
        let req = HttpRequest::get(url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 1);
        assert_eq!(req.headers[http::header::ACCEPT], "application/json");
    }

    #[test]
    fn body_text_is_none_without_body() {
        assert!(HttpRequest::get(url()).body_text().is_none());
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_follows_status_class() {
        for status in [http::StatusCode::OK, http::StatusCode::NO_CONTENT] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(resp.is_success(), "Expected {status} to be success");
        }
        for status in [
            http::StatusCode::UNAUTHORIZED,
            http::StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_success(), "Expected {status} to not be success");
        }
    }

    #[test]
    fn json_sets_body_and_content_type() {
        let resp = HttpResponse::json(
            http::StatusCode::CREATED,
            &serde_json::json!({"id": "cnt_1"}),
        );

        assert_eq!(resp.status, http::StatusCode::CREATED);
        assert_eq!(resp.headers[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(resp.body_text(), Some(r#"{"id":"cnt_1"}"#));
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![0xFF]);
        assert!(resp.body_text().is_none());
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("connection reset")));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("connection reset")
        );
    }

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn invalid_url_displays_reason() {
        let error = HttpError::InvalidUrl("missing scheme".to_string());
        assert_eq!(error.to_string(), "Invalid URL: missing scheme");
    }
}

mod http_client_trait {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: AtomicUsize,
    }

    impl HttpClient for CountingClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                vec![],
            ))
        }
    }

    #[tokio::test]
    async fn arc_delegates_to_inner_client() {
        let inner = Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
        });
        let shared = Arc::clone(&inner);

        shared.request(HttpRequest::get(url())).await.unwrap();
        shared.request(HttpRequest::get(url())).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
