//! Shared test fixtures for resource tests.

use crate::LysticaCloud;
use crate::config::ClientConfig;
use crate::engine::{NoJitter, RequestEngine};
use crate::time::InstantSleeper;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use http::StatusCode;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub type TestClient = LysticaCloud<Arc<MockApi>, InstantSleeper, NoJitter>;

/// Mock transport that replays canned responses and records every request.
///
/// Once the script is exhausted it answers `200 {}`.
#[derive(Debug, Default)]
pub struct MockApi {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockApi {
    pub fn new(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for MockApi {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| ok(&json!({}))))
    }
}

/// Builds a client over `api` that never sleeps between retries.
pub fn client(api: &Arc<MockApi>) -> TestClient {
    let config = ClientConfig::new("lys_test_fixture").with_base_url("https://api.test");
    let engine = RequestEngine::new(Arc::clone(api), &config)
        .with_sleeper(InstantSleeper)
        .with_jitter(NoJitter);
    LysticaCloud::with_engine(engine)
}

pub fn ok(body: &Value) -> HttpResponse {
    HttpResponse::json(StatusCode::OK, body)
}

pub fn status(code: u16, body: &Value) -> HttpResponse {
    HttpResponse::json(StatusCode::from_u16(code).unwrap(), body)
}

pub fn no_content() -> HttpResponse {
    HttpResponse::new(StatusCode::NO_CONTENT, http::HeaderMap::new(), Vec::new())
}

/// Decodes the JSON body of a recorded request.
pub fn body_of(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request has no body")).unwrap()
}

/// Returns the query pairs of a recorded request.
pub fn query_of(request: &HttpRequest) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

pub fn contact_json(id: &str) -> Value {
    json!({
        "id": id,
        "fullName": "Jane Doe",
        "firstName": "Jane",
        "lastName": "Doe",
        "email": format!("{id}@example.com"),
        "company": "Acme Inc",
        "tags": ["vip"],
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z"
    })
}

pub fn company_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Acme Inc",
        "domain": "acme.test",
        "foundedYear": 1999,
        "contactCount": 12,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z"
    })
}

pub fn email_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "to": ["jane@example.com"],
        "from": "team@acme.test",
        "subject": "Hello",
        "status": status,
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

pub fn list_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Enterprise Leads",
        "contactCount": 3,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z"
    })
}

/// Wraps items in a page envelope.
pub fn page(items: Vec<Value>, cursor: Option<&str>) -> Value {
    json!({
        "data": items,
        "meta": {
            "total": 1000,
            "limit": 200,
            "cursor": cursor,
            "hasMore": cursor.is_some()
        }
    })
}
