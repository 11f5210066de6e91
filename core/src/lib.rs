//! Synchronous client for the LocalBitcoins HTTP API.
//!
//! # Overview
//! [`Client`] builds requests against a base URL, sends them through a
//! caller-supplied [`Transport`], turns non-2xx responses into
//! [`ErrorResponse`]s and unwraps the `{"data": .., "actions": ..}` envelope
//! into typed entities. Two resource groups are modeled: accounts and
//! escrows.
//!
//! # Design
//! - Authentication is the transport's job. Pass a transport that attaches
//!   OAuth credentials (e.g. [`UreqTransport::with_bearer_token`]).
//! - Every operation is one blocking request/response exchange. No retries,
//!   no internal state; timeouts belong to the transport.
//! - Resource services borrow the client, so a single client can serve any
//!   number of concurrent callers when its transport allows it.
//!
//! ```no_run
//! use localbitcoins::{Client, UreqTransport};
//!
//! # fn main() -> localbitcoins::Result<()> {
//! let client = Client::new(UreqTransport::new().with_bearer_token("access-token"))?;
//! let me = client.accounts().get("")?;
//! println!("{me}");
//! for escrow in client.escrows().list()? {
//!     println!("{escrow}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod client;
pub mod envelope;
pub mod error;
pub mod escrows;
pub mod http;
pub mod response;
pub mod serde_util;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;

pub use accounts::AccountsService;
pub use client::{add_options, Client, DEFAULT_BASE_URL, LIBRARY_VERSION, USER_AGENT};
pub use envelope::ResponseData;
pub use error::{check_response, ApiErrorDetail, Error, ErrorResponse, Result};
pub use escrows::EscrowsService;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use response::Response;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Account, Escrow};
