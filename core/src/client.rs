//! Request construction and the send/classify/decode pipeline.
//!
//! # Design
//! `Client` holds a transport, a base URL and a user agent, none of which
//! change after construction. Building a request (`new_request`) is pure:
//! it resolves a relative path against the base URL and attaches headers
//! and an optional JSON body. `execute` hands the request to the transport
//! and classifies the response; `execute_decode` additionally unwraps the
//! response envelope. Resource services borrow the client and are thin
//! layers over these two calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::accounts::AccountsService;
use crate::envelope::{self, ResponseData};
use crate::error::{check_response, Error, Result};
use crate::escrows::EscrowsService;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::response::Response;

/// Root of the LocalBitcoins site. Resource paths are relative to it and
/// start with `api/`.
pub const DEFAULT_BASE_URL: &str = "https://localbitcoins.com/";

/// Version reported in the user agent.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("go-localbitcoins/", env!("CARGO_PKG_VERSION"));

/// Client for the LocalBitcoins API.
///
/// Safe to share between threads whenever the transport is.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    base_url: Url,
    user_agent: String,
}

impl<T: Transport> Client<T> {
    /// Create a client talking to [`DEFAULT_BASE_URL`] through `transport`.
    ///
    /// Authenticated endpoints (most of them) require a transport that
    /// attaches the caller's credentials.
    pub fn new(transport: T) -> Result<Self> {
        Ok(Self {
            transport,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Replace the base URL. A missing trailing slash is added, so relative
    /// paths always resolve beneath the given path.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(Url::parse(base_url)?);
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn accounts(&self) -> AccountsService<'_, T> {
        AccountsService::new(self)
    }

    pub fn escrows(&self) -> EscrowsService<'_, T> {
        EscrowsService::new(self)
    }

    /// Build a request without a body.
    ///
    /// `path` is resolved against the base URL with standard relative
    /// reference rules. It should not start with a slash; an absolute URL
    /// replaces the base entirely.
    pub fn new_request(&self, method: HttpMethod, path: &str) -> Result<HttpRequest> {
        self.build(method, path, None)
    }

    /// Build a request whose body is `body` encoded as JSON.
    pub fn new_json_request<B>(&self, method: HttpMethod, path: &str, body: &B) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(Error::Serialization)?;
        self.build(method, path, Some(body))
    }

    fn build(&self, method: HttpMethod, path: &str, body: Option<String>) -> Result<HttpRequest> {
        let url = self.base_url.join(path)?;
        let mut headers = vec![("User-Agent".to_string(), self.user_agent.clone())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Send a request and classify the response.
    ///
    /// Non-2xx statuses surface as [`Error::Api`]; the successful
    /// [`Response`] is returned untouched.
    pub fn execute(&self, request: &HttpRequest) -> Result<Response> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let http = self.transport.send(request).map_err(Error::Transport)?;
        let response = Response::from_exchange(request, http);
        tracing::debug!(status = response.status, url = %response.url, "received response");
        Ok(check_response(response)?)
    }

    /// Send a request, classify the response and decode its envelope.
    pub fn execute_decode<D, A>(&self, request: &HttpRequest) -> Result<(Response, ResponseData<D, A>)>
    where
        D: DeserializeOwned,
        A: DeserializeOwned,
    {
        let response = self.execute(request)?;
        let envelope = envelope::decode(&response.body)?;
        Ok((response, envelope))
    }
}

/// Append `options` to `path` as URL query parameters, replacing any query
/// already present. `None` fields are skipped.
pub fn add_options<O>(path: &str, options: &O) -> Result<String>
where
    O: Serialize + ?Sized,
{
    let query = serde_urlencoded::to_string(options)?;
    let base = path.split_once('?').map_or(path, |(base, _)| base);
    if query.is_empty() {
        return Ok(base.to_string());
    }
    Ok(format!("{base}?{query}"))
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
