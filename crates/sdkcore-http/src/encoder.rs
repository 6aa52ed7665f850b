//! Content-type driven body encoding
//!
//! The [`Encoder`] owns an ordered registry of [`Serializer`]s keyed by their
//! content-type pattern. Lookup lower-cases the content type and returns the
//! first registered serializer whose pattern is found anywhere in it, so
//! `application/JSON; charset=utf-8` resolves to the JSON serializer.
//!
//! Gzip is a separate transport layer. When a request's content encoding is
//! exactly `gzip`, the serialized bytes are compressed after encoding. When a
//! response's `Content-Encoding` is `gzip`, the body is fully decompressed
//! before it reaches the serializer.

use std::{
    io::{Read, Write},
    sync::Arc,
};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use reqwest::header::{HeaderMap, CONTENT_ENCODING, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{HttpError, Result},
    request::HttpRequest,
    serializers::{
        EncodedBody, FormEncodedSerializer, JsonSerializer, MultipartSerializer, Serializer,
        TextSerializer,
    },
};

/// Content encoding that triggers the gzip layer
pub const GZIP: &str = "gzip";

#[derive(Clone)]
struct Registration {
    pattern: String,
    regex: Regex,
    serializer: Arc<dyn Serializer>,
}

impl Registration {
    fn new(serializer: Arc<dyn Serializer>) -> Result<Self> {
        let pattern = serializer.content_type_pattern().to_string();
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                HttpError::configuration(format!("Invalid content-type pattern {pattern:?}: {e}"))
            })?;
        Ok(Self {
            pattern,
            regex,
            serializer,
        })
    }
}

static DEFAULT_SERIALIZERS: Lazy<Vec<Registration>> = Lazy::new(|| {
    let defaults: [Arc<dyn Serializer>; 4] = [
        Arc::new(JsonSerializer),
        Arc::new(TextSerializer),
        Arc::new(MultipartSerializer),
        Arc::new(FormEncodedSerializer),
    ];
    defaults
        .into_iter()
        .map(|serializer| Registration::new(serializer).expect("Invalid built-in pattern"))
        .collect()
});

/// Serializer registry and transport-encoding layer
#[derive(Clone)]
pub struct Encoder {
    registry: Vec<Registration>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("patterns", &self.supported_content_types())
            .finish()
    }
}

impl Encoder {
    /// Create an encoder seeded with the built-in serializers
    pub fn new() -> Self {
        Self {
            registry: DEFAULT_SERIALIZERS.clone(),
        }
    }

    /// Register a serializer for its pattern
    ///
    /// A serializer with the same pattern string as an existing one replaces
    /// it and keeps its position in the lookup order. New patterns are tried
    /// after every existing one.
    pub fn register_serializer(&mut self, serializer: Arc<dyn Serializer>) -> Result<()> {
        let registration = Registration::new(serializer)?;

        match self
            .registry
            .iter_mut()
            .find(|existing| existing.pattern == registration.pattern)
        {
            Some(existing) => {
                debug!("Replacing serializer for pattern {}", registration.pattern);
                *existing = registration;
            }
            None => {
                debug!("Registering serializer for pattern {}", registration.pattern);
                self.registry.push(registration);
            }
        }

        Ok(())
    }

    /// Registered patterns, in lookup order
    pub fn supported_content_types(&self) -> Vec<String> {
        self.registry.iter().map(|r| r.pattern.clone()).collect()
    }

    /// First serializer whose pattern matches the content type
    pub fn serializer_for(&self, content_type: &str) -> Option<Arc<dyn Serializer>> {
        let content_type = content_type.to_lowercase();
        self.registry
            .iter()
            .find(|r| r.regex.is_match(&content_type))
            .map(|r| Arc::clone(&r.serializer))
    }

    /// Encode the request body for transmission
    ///
    /// The request is only read. Its content type is lower-cased for
    /// matching; the value sent on the wire is whatever the serializer
    /// reports, which for the built-ins is the caller's original string.
    pub fn serialize_request(&self, request: &HttpRequest) -> Result<EncodedBody> {
        let content_type = request.content_type().ok_or_else(|| {
            HttpError::configuration("HttpRequest did not have content-type header set")
        })?;

        let serializer = self.require_serializer(content_type)?;
        let mut encoded = serializer.encode(request)?;

        if request.content_encoding() == Some(GZIP) {
            encoded.data = gzip(&encoded.data)?;
        }

        Ok(encoded)
    }

    /// Decode a response body into `R`
    pub fn deserialize_response<R: DeserializeOwned>(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<R> {
        let content_type = headers
            .get(CONTENT_TYPE)
            .ok_or_else(|| {
                HttpError::configuration("HTTP response did not have content-type header set")
            })?
            .to_str()
            .map_err(|e| HttpError::decoding(format!("Unreadable Content-Type header: {e}")))?;

        let serializer = self.require_serializer(content_type)?;

        let is_gzip = headers
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|encoding| encoding == GZIP);

        let value = if is_gzip {
            let decompressed = gunzip(body)?;
            serializer.decode(&decompressed, content_type)?
        } else {
            serializer.decode(body, content_type)?
        };

        serde_json::from_value(value).map_err(|e| {
            HttpError::decoding(format!(
                "Response body does not match the declared response type: {e}"
            ))
        })
    }

    fn require_serializer(&self, content_type: &str) -> Result<Arc<dyn Serializer>> {
        self.serializer_for(content_type)
            .ok_or_else(|| HttpError::UnsupportedContentType {
                content_type: content_type.to_string(),
                supported: self.supported_content_types(),
            })
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let compression_failed =
        |e: std::io::Error| HttpError::encoding(format!("Gzip compression failed: {e}"));
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(compression_failed)?;
    encoder.finish().map_err(compression_failed)
}

fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut decompressed)
        .map_err(|e| HttpError::decoding(format!("Gzip decompression failed: {e}")))?;
    Ok(decompressed)
}
