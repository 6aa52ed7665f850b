use serde_json::Value;

use super::{body_and_content_type, value_to_text, EncodedBody, Serializer};
use crate::{
    error::{HttpError, Result},
    request::HttpRequest,
};

/// `text/*` bodies
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSerializer;

impl TextSerializer {
    pub const PATTERN: &'static str = "^text/.*$";
}

impl Serializer for TextSerializer {
    fn content_type_pattern(&self) -> &str {
        Self::PATTERN
    }

    fn encode(&self, request: &HttpRequest) -> Result<EncodedBody> {
        let (body, content_type) = body_and_content_type(request)?;
        Ok(EncodedBody::new(content_type, value_to_text(body)))
    }

    fn decode(&self, body: &[u8], _content_type: &str) -> Result<Value> {
        let text = String::from_utf8(body.to_vec())
            .map_err(|e| HttpError::decoding(format!("Text response is not valid UTF-8: {e}")))?;
        Ok(Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_string_body_verbatim() {
        let request = HttpRequest::post("/")
            .with_content_type("text/plain")
            .with_body("some text here")
            .unwrap();

        let encoded = TextSerializer.encode(&request).unwrap();
        assert_eq!(encoded.data, b"some text here");
    }

    #[test]
    fn test_encode_coerces_non_string_body() {
        let mut request = HttpRequest::post("/").with_content_type("text/plain");
        request.set_body(json!(42));

        let encoded = TextSerializer.encode(&request).unwrap();
        assert_eq!(encoded.data, b"42");
    }

    #[test]
    fn test_decode_returns_raw_string() {
        let value = TextSerializer.decode(b"<html></html>", "text/html").unwrap();
        assert_eq!(value, Value::String("<html></html>".to_string()));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = TextSerializer.decode(&[0xff, 0xfe], "text/plain");
        assert!(matches!(result, Err(HttpError::Decoding { .. })));
    }
}
