use serde_json::{Map, Value};
use url::form_urlencoded;

use super::{body_and_content_type, value_to_text, EncodedBody, Serializer};
use crate::{
    error::{HttpError, Result},
    request::HttpRequest,
};

/// `application/x-www-form-urlencoded` bodies
///
/// The body must be a JSON object; each member becomes one `key=value` pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormEncodedSerializer;

impl FormEncodedSerializer {
    pub const PATTERN: &'static str = "^application/x-www-form-urlencoded$";
}

impl Serializer for FormEncodedSerializer {
    fn content_type_pattern(&self) -> &str {
        Self::PATTERN
    }

    fn encode(&self, request: &HttpRequest) -> Result<EncodedBody> {
        let (body, content_type) = body_and_content_type(request)?;
        let fields = body.as_object().ok_or_else(|| {
            HttpError::encoding("Form-encoded request body must be an object of fields")
        })?;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in fields {
            serializer.append_pair(key, &value_to_text(value));
        }

        Ok(EncodedBody::new(content_type, serializer.finish()))
    }

    fn decode(&self, body: &[u8], _content_type: &str) -> Result<Value> {
        let fields: Map<String, Value> = form_urlencoded::parse(body)
            .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
            .collect();
        Ok(Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_object_fields() {
        let request = HttpRequest::post("/")
            .with_content_type("application/x-www-form-urlencoded")
            .with_body(&json!({"grant_type": "client_credentials", "scope": "a b"}))
            .unwrap();

        let encoded = FormEncodedSerializer.encode(&request).unwrap();
        assert_eq!(
            String::from_utf8(encoded.data).unwrap(),
            "grant_type=client_credentials&scope=a+b"
        );
    }

    #[test]
    fn test_encode_rejects_non_object() {
        let request = HttpRequest::post("/")
            .with_content_type("application/x-www-form-urlencoded")
            .with_body(&json!(["a", "b"]))
            .unwrap();

        let result = FormEncodedSerializer.encode(&request);
        assert!(matches!(result, Err(HttpError::Encoding { .. })));
    }

    #[test]
    fn test_decode_pairs() {
        let value = FormEncodedSerializer
            .decode(b"access_token=abc%3D&expires_in=3600", "application/x-www-form-urlencoded")
            .unwrap();
        assert_eq!(value, json!({"access_token": "abc=", "expires_in": "3600"}));
    }
}
