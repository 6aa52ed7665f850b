use serde_json::Value;
use uuid::Uuid;

use super::{body_and_content_type, value_to_text, EncodedBody, Serializer};
use crate::{
    error::{HttpError, Result},
    request::HttpRequest,
};

/// `multipart/*` request bodies
///
/// Each member of the object body becomes one `form-data` part. Objects and
/// arrays are sent as `application/json` parts named `<field>.json`; other
/// values are sent as plain text. A boundary is generated and appended to
/// the content type unless the caller already supplied one.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultipartSerializer;

impl MultipartSerializer {
    pub const PATTERN: &'static str = "^multipart/.*$";
}

impl Serializer for MultipartSerializer {
    fn content_type_pattern(&self) -> &str {
        Self::PATTERN
    }

    fn encode(&self, request: &HttpRequest) -> Result<EncodedBody> {
        let (body, content_type) = body_and_content_type(request)?;
        let fields = body.as_object().ok_or_else(|| {
            HttpError::encoding("Multipart request body must be an object of parts")
        })?;

        let (content_type, boundary) = match existing_boundary(content_type) {
            Some(boundary) => (content_type.to_string(), boundary),
            None => {
                let boundary = format!("boundary{}", Uuid::new_v4().simple());
                (format!("{content_type}; boundary={boundary}"), boundary)
            }
        };

        let mut data = String::new();
        for (name, value) in fields {
            data.push_str(&format!("--{boundary}\r\n"));
            match value {
                Value::Object(_) | Value::Array(_) => {
                    data.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"; \
                         filename=\"{name}.json\"\r\n"
                    ));
                    data.push_str("Content-Type: application/json\r\n\r\n");
                }
                _ => {
                    data.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                    ));
                }
            }
            data.push_str(&value_to_text(value));
            data.push_str("\r\n");
        }
        data.push_str(&format!("--{boundary}--\r\n"));

        Ok(EncodedBody::new(content_type, data))
    }

    fn decode(&self, _body: &[u8], content_type: &str) -> Result<Value> {
        Err(HttpError::decoding(format!(
            "Decoding {content_type} responses is not supported"
        )))
    }
}

fn existing_boundary(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|param| {
        let (key, value) = param.trim().split_once('=')?;
        key.eq_ignore_ascii_case("boundary")
            .then(|| value.trim_matches('"').to_string())
    })
}
