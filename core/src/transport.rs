//! Blocking [`Transport`] backed by ureq.
//!
//! # Design
//! ureq is configured to return 4xx/5xx responses as data rather than
//! errors, so status interpretation stays with the client's classifier.
//! An agent supplied by the caller that still treats statuses as errors is
//! handled too: the status is turned back into a response with an empty
//! body.

use std::fmt;
use std::time::Duration;

use ureq::Agent;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// ureq-based transport, optionally attaching an OAuth bearer token to
/// every request.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    bearer_token: Option<String>,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::from_agent(agent(None))
    }

    /// Use a preconfigured agent (proxies, TLS, timeouts).
    pub fn from_agent(agent: Agent) -> Self {
        Self {
            agent,
            bearer_token: None,
        }
    }

    /// Default agent with every request bounded by `timeout`. To combine a
    /// timeout with other agent settings, configure it on the agent passed
    /// to [`from_agent`](Self::from_agent).
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_agent(agent(Some(timeout)))
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn apply_headers<B>(
        &self,
        mut builder: ureq::RequestBuilder<B>,
        request: &HttpRequest,
    ) -> ureq::RequestBuilder<B> {
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.apply_headers(self.agent.get(url), request).call(),
            (HttpMethod::Post, Some(body)) => self.apply_headers(self.agent.post(url), request).send(body.as_bytes()),
            (HttpMethod::Post, None) => self.apply_headers(self.agent.post(url), request).send_empty(),
        };

        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(status)) => {
                return Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: String::new(),
                })
            }
            Err(err) => return Err(err.into()),
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let bytes = response.body_mut().with_config().limit(u64::MAX).read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        Ok(HttpResponse { status, headers, body })
    }
}

fn agent(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}
