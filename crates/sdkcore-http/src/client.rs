//! HTTP client implementation

use std::{sync::Arc, time::Duration};

use reqwest::header::{HeaderValue, CONTENT_ENCODING, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{
    config::HttpConfig,
    encoder::Encoder,
    environment::Environment,
    error::{HttpError, HttpException, Result},
    injector::Injector,
    pool::{shared_transport, Transport},
    request::HttpRequest,
    response::HttpResponse,
};

/// Executes [`HttpRequest`]s against one environment
///
/// Every client built for the same base URL sends through the same pooled
/// [`Transport`]. Injectors and serializer registrations are per client and
/// are expected to be set up before requests start.
pub struct HttpClient {
    environment: Arc<dyn Environment>,
    encoder: Encoder,
    injectors: Vec<Arc<dyn Injector>>,
    transport: Arc<Transport>,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new(environment: impl Environment + 'static) -> Result<Self> {
        Self::with_config(environment, HttpConfig::default())
    }

    /// Create a client with configuration
    ///
    /// Transport settings in `config` only take effect if this is the first
    /// client for the environment's base URL.
    pub fn with_config(
        environment: impl Environment + 'static,
        config: HttpConfig,
    ) -> Result<Self> {
        let transport = shared_transport(environment.base_url(), &config)?;

        Ok(Self {
            environment: Arc::new(environment),
            encoder: Encoder::new(),
            injectors: Vec::new(),
            transport,
            timeout: config.timeout,
        })
    }

    /// Append an injector; `None` is ignored
    pub fn add_injector(&mut self, injector: impl Into<Option<Arc<dyn Injector>>>) {
        match injector.into() {
            Some(injector) => self.injectors.push(injector),
            None => debug!("Ignoring empty injector registration"),
        }
    }

    /// Override the send timeout for requests made through this client
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut Encoder {
        &mut self.encoder
    }

    /// Shared transport this client sends through
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Execute a request and decode a 2xx body into `R`
    ///
    /// Non-2xx responses fail with [`HttpError::Http`] carrying the status,
    /// headers and raw body text. The caller's `request` is never modified.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse<R>> {
        let response = self.send(request).await?;
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let body = response.text().await?;
            debug!("HTTP {} rejected: {}", status, body);
            return Err(HttpException::new(status, headers, body).into());
        }

        let result = if headers.contains_key(CONTENT_TYPE) {
            let body = response.bytes().await?;
            if body.is_empty() {
                None
            } else {
                Some(self.encoder.deserialize_response::<R>(&headers, &body)?)
            }
        } else {
            None
        };

        Ok(HttpResponse::new(headers, status, result))
    }

    /// Execute a request and return the transport response untouched
    ///
    /// No status classification or body decoding is performed.
    pub async fn execute_raw(&self, request: &HttpRequest) -> Result<reqwest::Response> {
        self.send(request).await
    }

    async fn send(&self, request: &HttpRequest) -> Result<reqwest::Response> {
        let mut request = request.clone();
        debug!("Executing {} {}", request.verb(), request.path());

        for (index, injector) in self.injectors.iter().enumerate() {
            debug!("Running injector {} of {}", index + 1, self.injectors.len());
            request = injector.inject(request).await?;
        }

        let url = self.resolve_url(&request)?;
        request.set_url(url.clone());

        let mut headers = request.headers().clone();
        let body = match request.body() {
            Some(_) => {
                let encoded = self.encoder.serialize_request(&request)?;
                debug!(
                    "Serialized {} bytes as {}",
                    encoded.data.len(),
                    encoded.content_type
                );

                headers.insert(CONTENT_TYPE, header_value(&encoded.content_type)?);
                if let Some(encoding) = request.content_encoding() {
                    headers.insert(CONTENT_ENCODING, header_value(encoding)?);
                }
                Some(encoded.data)
            }
            None => None,
        };

        let mut builder = self
            .transport
            .client()
            .request(request.verb().clone(), url)
            .timeout(self.timeout)
            .headers(headers);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        debug!("HTTP {} {} -> {}", request.verb(), request.path(), response.status());

        Ok(response)
    }

    fn resolve_url(&self, request: &HttpRequest) -> Result<Url> {
        let url = format!("{}{}", self.environment.base_url(), request.path());
        debug!("Resolved request URL: {}", url);
        url.parse::<Url>()
            .map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| HttpError::configuration(format!("Invalid header value {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;

    #[test]
    fn test_client_creation_with_defaults() {
        let client = HttpClient::new(StaticEnvironment::new("http://client-test.invalid:2001"));
        assert!(client.is_ok());

        let client = client.unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(300));
        assert_eq!(client.encoder().supported_content_types().len(), 4);
    }

    #[test]
    fn test_clients_share_transport_case_insensitively() {
        let a = HttpClient::new(StaticEnvironment::new("http://client-test.invalid:2002")).unwrap();
        let b = HttpClient::new(StaticEnvironment::new("http://CLIENT-TEST.invalid:2002")).unwrap();
        assert!(Arc::ptr_eq(a.transport(), b.transport()));
    }

    #[test]
    fn test_set_timeout() {
        let mut client =
            HttpClient::new(StaticEnvironment::new("http://client-test.invalid:2003")).unwrap();
        client.set_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_injector_is_ignored() {
        let mut client =
            HttpClient::new(StaticEnvironment::new("http://client-test.invalid:2004")).unwrap();
        client.add_injector(None);
        assert!(client.injectors.is_empty());
    }

    #[test]
    fn test_add_injector_accepts_bare_and_optional_arcs() {
        let mut client =
            HttpClient::new(StaticEnvironment::new("http://client-test.invalid:2005")).unwrap();
        let injector: Arc<dyn Injector> = Arc::new(|request: HttpRequest| request);

        client.add_injector(Arc::clone(&injector));
        client.add_injector(Some(injector));
        assert_eq!(client.injectors.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_base_url() {
        let client = HttpClient::new(StaticEnvironment::new("not a url")).unwrap();
        let result = client.execute::<serde_json::Value>(&HttpRequest::get("/")).await;
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_body_without_content_type_fails_before_send() {
        // Nothing listens on this address; reaching the network would surface
        // as RequestFailed instead.
        let client = HttpClient::new(StaticEnvironment::new("http://127.0.0.1:9")).unwrap();
        let request = HttpRequest::post("/").with_body("no content type").unwrap();

        let result = client.execute::<serde_json::Value>(&request).await;
        assert!(matches!(result, Err(HttpError::Configuration { .. })));
    }
}
