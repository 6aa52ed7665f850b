//! HTTP client core for generated API SDKs
//!
//! Executes requests against a configured base URL, negotiating body
//! encoding through a pluggable serializer registry.
//!
//! ## Features
//!
//! - **Serializer registry**: content types are matched case-insensitively
//!   against regex patterns; JSON, text, multipart and form-encoded are built in
//! - **Gzip transport encoding**: applied after serialization and removed
//!   before deserialization
//! - **Injector chain**: ordered request mutation before send
//! - **Connection pooling**: one shared transport per base URL for the life
//!   of the process
//! - **Structured failures**: non-2xx responses surface as [`HttpException`]
//!
//! ```ignore
//! use sdkcore_http::{HttpClient, HttpRequest, StaticEnvironment};
//!
//! let client = HttpClient::new(StaticEnvironment::new("https://api.example.com"))?;
//! let request = HttpRequest::post("/v1/orders")
//!     .with_content_type("application/json")
//!     .with_body(&order)?;
//! let response = client.execute::<Order>(&request).await?;
//! ```

pub mod client;
pub mod config;
pub mod encoder;
pub mod environment;
pub mod error;
pub mod injector;
pub mod pool;
pub mod request;
pub mod response;
pub mod serializers;

pub use client::HttpClient;
pub use config::{HttpConfig, DEFAULT_USER_AGENT};
pub use encoder::Encoder;
pub use environment::{Environment, StaticEnvironment};
pub use error::{HttpError, HttpException, Result};
pub use injector::Injector;
pub use pool::Transport;
pub use request::HttpRequest;
pub use response::HttpResponse;
pub use serializers::{
    EncodedBody, FormEncodedSerializer, JsonSerializer, MultipartSerializer, Serializer,
    TextSerializer,
};

/// Re-export commonly used types
pub use reqwest::{header, Method, StatusCode};
