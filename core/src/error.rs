//! Error types for the LocalBitcoins client.
//!
//! # Design
//! Every failure is returned to the immediate caller. Local failures
//! (`MalformedUrl`, `Serialization`, `QueryEncoding`, `Precondition`) happen
//! before any I/O. `Transport` carries the transport's own error verbatim.
//! Any non-2xx status becomes `Api`, which keeps the full [`Response`] so
//! callers can still inspect status, headers and body.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::http::TransportError;
use crate::response::Response;

/// Errors returned by the client and its services.
#[derive(Debug, Error)]
pub enum Error {
    /// A path could not be resolved against the base URL.
    #[error("malformed URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The request body could not be encoded as JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Query options could not be encoded.
    #[error("failed to encode query options: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    /// The transport failed to exchange the request.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The API answered with a status outside 200..=299.
    #[error(transparent)]
    Api(#[from] ErrorResponse),

    /// A successful response body did not match the expected envelope.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// An operation was invoked on an entity lacking required state.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl Error {
    /// HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.response.status),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The `error` object of an API error body: `{"message": .., "error_code": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "error_code", default)]
    pub code: i64,
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {} error with message \"{}\"", self.code, self.message)
    }
}

/// A non-2xx API response together with its best-effort decoded error body.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub response: Response,
    pub error: ApiErrorDetail,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} - {} {}",
            self.response.method, self.response.url, self.response.status, self.error.message, self.error.code
        )
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: ApiErrorDetail,
}

/// Classify a response: 2xx passes through, anything else becomes an
/// [`ErrorResponse`].
///
/// The error body is decoded when possible. An empty or undecodable body
/// still yields an `ErrorResponse`, with an empty message and code 0.
pub fn check_response(response: Response) -> std::result::Result<Response, ErrorResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let error = if response.body.trim().is_empty() {
        ApiErrorDetail::default()
    } else {
        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => body.error,
            Err(err) => {
                tracing::warn!(status = response.status, error = %err, "undecodable API error body");
                ApiErrorDetail::default()
            }
        }
    };
    Err(ErrorResponse { response, error })
}
