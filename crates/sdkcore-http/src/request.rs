//! Outgoing request description

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{HttpError, Result};

/// A request to be executed against a client's base URL
///
/// `HttpClient::execute` works on a clone, so nothing done during execution
/// (injection, URL resolution, serialization) is visible on the value the
/// caller passed in.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    path: String,
    verb: Method,
    headers: HeaderMap,
    body: Option<Value>,
    content_type: Option<String>,
    content_encoding: Option<String>,
    url: Option<Url>,
}

impl HttpRequest {
    pub fn new(path: impl Into<String>, verb: Method) -> Self {
        Self {
            path: path.into(),
            verb,
            headers: HeaderMap::new(),
            body: None,
            content_type: None,
            content_encoding: None,
            url: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, Method::GET)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, Method::POST)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path, Method::PUT)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(path, Method::PATCH)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path, Method::DELETE)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(path, Method::HEAD)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn verb(&self) -> &Method {
        &self.verb
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set a header, replacing any existing values for the name
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add a value for a header, keeping any existing values
    pub fn append_header(&mut self, name: &str, value: &str) -> Result<()> {
        let (name, value) = parse_header(name, value)?;
        self.headers.append(name, value);
        Ok(())
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: impl Into<Value>) {
        self.body = Some(body.into());
    }

    /// Attach any serializable value as the body
    pub fn with_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| HttpError::encoding(format!("Request body is not serializable: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.set_content_type(content_type);
        self
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    pub fn set_content_encoding(&mut self, content_encoding: impl Into<String>) {
        self.content_encoding = Some(content_encoding.into());
    }

    pub fn with_content_encoding(mut self, content_encoding: impl Into<String>) -> Self {
        self.set_content_encoding(content_encoding);
        self
    }

    /// Absolute URL, only set on the working copy during execution
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub(crate) fn set_url(&mut self, url: Url) {
        self.url = Some(url);
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| HttpError::configuration(format!("Invalid header name {name:?}: {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| HttpError::configuration(format!("Invalid value for header {name}: {e}")))?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payment {
        name: String,
    }

    #[test]
    fn test_new_request_is_empty() {
        let request = HttpRequest::post("/v1/payments");
        assert_eq!(request.path(), "/v1/payments");
        assert_eq!(request.verb(), &Method::POST);
        assert!(request.headers().is_empty());
        assert!(request.body().is_none());
        assert!(request.content_type().is_none());
        assert!(request.url().is_none());
    }

    #[test]
    fn test_with_body_serializes_value() {
        let request = HttpRequest::post("/")
            .with_body(&Payment {
                name: "paypal".to_string(),
            })
            .unwrap();
        assert_eq!(request.body(), Some(&json!({"name": "paypal"})));
    }

    #[test]
    fn test_headers_are_case_insensitive_and_multi_valued() {
        let mut request = HttpRequest::get("/").with_header("X-Trace", "one").unwrap();
        request.append_header("x-trace", "two").unwrap();

        let values: Vec<_> = request
            .headers()
            .get_all("X-TRACE")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["one", "two"]);
    }

    #[test]
    fn test_invalid_header_name_is_configuration_error() {
        let result = HttpRequest::get("/").with_header("bad header", "x");
        assert!(matches!(result, Err(HttpError::Configuration { .. })));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = HttpRequest::get("/");
        let mut copy = original.clone();
        copy.append_header("X-Injected", "1").unwrap();
        copy.set_content_type("text/plain");

        assert!(original.headers().is_empty());
        assert!(original.content_type().is_none());
    }
}
