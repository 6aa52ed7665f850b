//! Content-type serializers
//!
//! A [`Serializer`] converts a request body into wire bytes, and response
//! bytes into a [`serde_json::Value`], for one family of content types. The
//! family is described by a regular expression that the
//! [`Encoder`](crate::Encoder) matches case-insensitively against the
//! content type.
//!
//! Built-in serializers:
//!
//! - [`JsonSerializer`]: any content type containing `application/json`
//! - [`TextSerializer`]: `text/*`
//! - [`MultipartSerializer`]: `multipart/*`
//! - [`FormEncodedSerializer`]: `application/x-www-form-urlencoded`

mod form;
mod json;
mod multipart;
mod text;

pub use form::FormEncodedSerializer;
pub use json::JsonSerializer;
pub use multipart::MultipartSerializer;
pub use text::TextSerializer;

use serde_json::Value;

use crate::{
    error::{HttpError, Result},
    request::HttpRequest,
};

/// Encoded request body together with the content type to transmit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl EncodedBody {
    pub fn new(content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// Encodes and decodes bodies for one content-type family
pub trait Serializer: Send + Sync {
    /// Regular expression claimed by this serializer
    fn content_type_pattern(&self) -> &str;

    /// Encode the request body
    fn encode(&self, request: &HttpRequest) -> Result<EncodedBody>;

    /// Decode a response body
    fn decode(&self, body: &[u8], content_type: &str) -> Result<Value>;
}

/// Body and content type of a request that is about to be encoded
///
/// Serializers are only invoked for requests that carry both.
pub(crate) fn body_and_content_type(request: &HttpRequest) -> Result<(&Value, &str)> {
    let body = request
        .body()
        .ok_or_else(|| HttpError::encoding("Request has no body to encode"))?;
    let content_type = request
        .content_type()
        .ok_or_else(|| {
            HttpError::configuration("HttpRequest did not have content-type header set")
        })?;
    Ok((body, content_type))
}

/// Text form of a body value: strings verbatim, everything else as JSON
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
