//! Decoded response returned by a successful execution

use reqwest::{header::HeaderMap, StatusCode};

/// Response to a 2xx request
///
/// `result` is present only when the response carried a content type and a
/// non-empty body that decoded into `R`.
#[derive(Debug, Clone)]
pub struct HttpResponse<R> {
    pub headers: HeaderMap,
    pub status_code: StatusCode,
    pub result: Option<R>,
}

impl<R> HttpResponse<R> {
    pub fn new(headers: HeaderMap, status_code: StatusCode, result: Option<R>) -> Self {
        Self {
            headers,
            status_code,
            result,
        }
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<R> {
        self.result
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }
}
