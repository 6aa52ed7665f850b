use serde_json::Value;

use super::{body_and_content_type, EncodedBody, Serializer};
use crate::{
    error::{HttpError, Result},
    request::HttpRequest,
};

/// `application/json` bodies
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub const PATTERN: &'static str = "application/json";
}

impl Serializer for JsonSerializer {
    fn content_type_pattern(&self) -> &str {
        Self::PATTERN
    }

    fn encode(&self, request: &HttpRequest) -> Result<EncodedBody> {
        let (body, content_type) = body_and_content_type(request)?;
        let data = serde_json::to_vec(body)
            .map_err(|e| HttpError::encoding(format!("Failed to encode JSON body: {e}")))?;
        Ok(EncodedBody::new(content_type, data))
    }

    fn decode(&self, body: &[u8], _content_type: &str) -> Result<Value> {
        serde_json::from_slice(body)
            .map_err(|e| HttpError::decoding(format!("Malformed JSON response: {e}")))
    }
}
