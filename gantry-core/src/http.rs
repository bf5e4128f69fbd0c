// HTTP request and response types at the transport boundary
//
// The container does not implement connection handling or body framing; it
// only needs a request exposing a path and named string parameters, and a
// response exposing a writable body sink.

use serde::Serialize;
use std::collections::HashMap;

/// HTTP request wrapper
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    /// Named request fields; each field may carry one or more values.
    pub query_params: HashMap<String, Vec<String>>,
}

impl HttpRequest {
    /// Build a request from a method and a target that may carry a query
    /// string (`/test/query?name=Ann`).
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query)),
            None => (target.clone(), None),
        };
        Self {
            method: method.into(),
            path,
            headers: HashMap::new(),
            body: Vec::new(),
            query_params: query.map(parse_query_string).unwrap_or_default(),
        }
    }

    /// All values of a named request field
    pub fn param_values(&self, name: &str) -> Option<&[String]> {
        self.query_params.get(name).map(Vec::as_slice)
    }

    /// First value of a named request field
    pub fn first_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// HTTP response wrapper
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn not_found() -> Self {
        Self::new(404)
    }

    pub fn internal_server_error() -> Self {
        Self::new(500)
    }

    /// Append text to the response body. This is the sink handler methods
    /// write through.
    pub fn write(&mut self, text: &str) {
        self.body.extend_from_slice(text.as_bytes());
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body = serde_json::to_vec(value)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::ok()
    }
}

/// Parse a query string into a multi-valued parameter map
fn parse_query_string(query: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    for part in query.split('&').filter(|part| !part.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        params
            .entry(decode(key))
            .or_default()
            .push(decode(value));
    }
    params
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_splits_query() {
        let req = HttpRequest::new("GET", "/test/query?name=Ann");
        assert_eq!(req.path, "/test/query");
        assert_eq!(req.first_param("name"), Some("Ann"));
    }

    #[test]
    fn test_request_without_query() {
        let req = HttpRequest::new("GET", "/test/query");
        assert_eq!(req.path, "/test/query");
        assert!(req.query_params.is_empty());
    }

    #[test]
    fn test_multi_valued_params() {
        let req = HttpRequest::new("GET", "/q?tag=rust&tag=web");
        assert_eq!(
            req.param_values("tag"),
            Some(&["rust".to_string(), "web".to_string()][..])
        );
        assert_eq!(req.first_param("tag"), Some("rust"));
    }

    #[test]
    fn test_percent_decoding() {
        let req = HttpRequest::new("GET", "/q?name=Ann%20Lee&email=a%40b.c");
        assert_eq!(req.first_param("name"), Some("Ann Lee"));
        assert_eq!(req.first_param("email"), Some("a@b.c"));
    }

    #[test]
    fn test_param_without_value() {
        let req = HttpRequest::new("GET", "/q?flag&debug=true");
        assert_eq!(req.first_param("flag"), Some(""));
        assert_eq!(req.first_param("debug"), Some("true"));
    }

    #[test]
    fn test_response_write_appends() {
        let mut resp = HttpResponse::ok();
        resp.write("Hello ");
        resp.write("Ann !");
        assert_eq!(resp.body_text(), "Hello Ann !");
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn test_response_with_json() {
        let resp = HttpResponse::ok()
            .with_json(&serde_json::json!({"ok": true}))
            .unwrap();
        assert_eq!(
            resp.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(resp.body_text(), r#"{"ok":true}"#);
    }
}
