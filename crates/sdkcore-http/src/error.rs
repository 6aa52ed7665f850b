//! HTTP client error types

use reqwest::{header::HeaderMap, StatusCode};
use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// A non-2xx response surfaced to the caller
///
/// The body is kept as raw text, undecoded, so callers can render or log it
/// regardless of its content type.
#[derive(Debug, Clone, Error)]
#[error("HTTP {status}: {body}")]
pub struct HttpException {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpException {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

/// HTTP client errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// A required setting is missing or malformed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// No registered serializer matches the content type
    #[error(
        "No serializer registered for Content-Type {content_type}. Supported encodings are {}",
        .supported.join(", ")
    )]
    UnsupportedContentType {
        content_type: String,
        supported: Vec<String>,
    },

    /// Request body could not be encoded
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// Response body could not be decoded
    #[error("Decoding error: {message}")]
    Decoding { message: String },

    /// Server answered with a non-2xx status
    #[error(transparent)]
    Http(#[from] HttpException),

    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        HttpError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        HttpError::Encoding {
            message: message.into(),
        }
    }

    pub(crate) fn decoding(message: impl Into<String>) -> Self {
        HttpError::Decoding {
            message: message.into(),
        }
    }

    /// True when the server rejected the request with a non-2xx status
    pub fn is_http_exception(&self) -> bool {
        matches!(self, HttpError::Http(_))
    }

    /// The non-2xx response, if this error carries one
    pub fn as_http_exception(&self) -> Option<&HttpException> {
        match self {
            HttpError::Http(exception) => Some(exception),
            _ => None,
        }
    }

    /// True when the failure originates in client setup or body handling
    /// rather than the network or the server
    pub fn is_client_misconfiguration(&self) -> bool {
        matches!(
            self,
            HttpError::Configuration { .. }
                | HttpError::UnsupportedContentType { .. }
                | HttpError::Encoding { .. }
                | HttpError::Decoding { .. }
                | HttpError::InvalidUrl(_)
                | HttpError::InvalidProxy(_)
                | HttpError::BuildError(_)
        )
    }
}
