//! Logical request descriptions and URL construction.

use std::fmt;

use http::Method;
use url::Url;

/// A scalar query parameter value, or its absence.
///
/// Absent values and empty strings are never put on the wire, so optional
/// filters can be passed straight through without producing `?field=`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Text value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value, sent as `true`/`false`
    Bool(bool),
    /// No value; the parameter is omitted
    Absent,
}

impl QueryValue {
    /// Returns the wire representation, or `None` if the parameter must be
    /// omitted.
    #[must_use]
    pub fn to_query_string(&self) -> Option<String> {
        let rendered = match self {
            Self::Absent => return None,
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        };
        (!rendered.is_empty()).then_some(rendered)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// One logical API call: method, path, query and optional JSON body.
///
/// Built by the resource layer and consumed (by reference) by the engine,
/// which never modifies it.
///
/// # Example
///
/// ```
/// use lystica_cloud::engine::RequestSpec;
///
/// let spec = RequestSpec::get("/api/v1/contacts")
///     .query("limit", 50)
///     .query("industry", None::<String>);
/// assert_eq!(spec.path(), "/api/v1/contacts");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, QueryValue)>,
    body: Option<serde_json::Value>,
}

impl RequestSpec {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets a query parameter, replacing an earlier value for the same key.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.query.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.query.push((key, value));
        }
        self
    }

    /// Sets every parameter from an iterator of pairs.
    #[must_use]
    pub fn query_pairs<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
    {
        pairs
            .into_iter()
            .fold(self, |spec, (key, value)| spec.query(key, value))
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path, relative to the base address.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in insertion order, absent ones included.
    #[must_use]
    pub fn query_params(&self) -> &[(String, QueryValue)] {
        &self.query
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Places the path under `base` and then appends the sendable parameters.
    ///
    /// Scheme, host and port always come from `base`, and any path prefix on
    /// `base` is kept. A missing leading `/` on the path is treated as if it
    /// were present. Parameters that are absent or render as an empty string
    /// are left out, and no `?` is appended when nothing survives.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError::RelativeUrlWithCannotBeABaseBase`] if `base`
    /// cannot carry a path (e.g. `mailto:`).
    pub fn build_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.set_path(&format!(
            "{}/{}",
            base.path().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        ));

        let pairs: Vec<(&str, String)> = self
            .query
            .iter()
            .filter_map(|(key, value)| value.to_query_string().map(|v| (key.as_str(), v)))
            .collect();

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }
}

impl fmt::Display for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
