//! Raw API responses.

use crate::http::{find_header, HttpMethod, HttpRequest, HttpResponse};

/// A LocalBitcoins API response: the transport's `HttpResponse` plus the
/// method and URL of the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    pub(crate) fn from_exchange(request: &HttpRequest, response: HttpResponse) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }

    /// `true` for statuses in 200..=299.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}
