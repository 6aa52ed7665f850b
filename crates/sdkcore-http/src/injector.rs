//! Request mutation hooks run before send

use async_trait::async_trait;

use crate::{error::Result, request::HttpRequest};

/// Inspects or rewrites an outgoing request
///
/// Injectors run sequentially in registration order on the client's working
/// copy of the request, so later injectors observe earlier ones' changes.
#[async_trait]
pub trait Injector: Send + Sync {
    async fn inject(&self, request: HttpRequest) -> Result<HttpRequest>;
}

#[async_trait]
impl<F> Injector for F
where
    F: Fn(HttpRequest) -> HttpRequest + Send + Sync,
{
    async fn inject(&self, request: HttpRequest) -> Result<HttpRequest> {
        Ok(self(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_injector() {
        let injector = |mut request: HttpRequest| {
            request.append_header("X-Request-Id", "abc").unwrap();
            request
        };

        let request = injector.inject(HttpRequest::get("/")).await.unwrap();
        assert_eq!(request.headers().get("x-request-id").unwrap(), "abc");
    }
}
