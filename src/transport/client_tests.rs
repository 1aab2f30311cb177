//! Tests for `ReqwestClient`.
//!
//! Exchanges against a live local server are covered in `tests/transport.rs`.

use super::*;

mod reqwest_client {
    use super::*;

    #[test]
    fn default_creates_client() {
        let client = ReqwestClient::default();
        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        let _ = format!("{client:?}");
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

        let result = client.request(HttpRequest::get(url)).await;

        // Behind a proxy the proxy may answer with an error status instead
        // of the DNS failure surfacing directly.
        match result {
            Err(HttpError::Connection(_)) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}
