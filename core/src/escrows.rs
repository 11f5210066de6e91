//! Escrow listing and release.
//!
//! # Design
//! The listing wraps each escrow in its own envelope:
//! `{"data": {"escrow_list": [{"data": {..}, "actions": {"release_url": ..}}]}}`.
//! Each escrow is decoded from its inner `data`, then its release URL is
//! attached from the sibling `actions`. Only escrows produced this way can
//! be released.

use serde::Deserialize;

use crate::client::Client;
use crate::envelope::ResponseData;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, Transport};
use crate::response::Response;
use crate::types::Escrow;

#[derive(Debug, Deserialize)]
struct EscrowList {
    #[serde(default)]
    escrow_list: Option<Vec<ResponseData<Escrow, EscrowActions>>>,
}

#[derive(Debug, Deserialize)]
struct EscrowActions {
    #[serde(default)]
    release_url: Option<String>,
}

fn into_escrow(item: ResponseData<Escrow, EscrowActions>) -> Escrow {
    let mut escrow = item.data;
    escrow.release_url = item.actions.and_then(|actions| actions.release_url);
    escrow
}

/// Escrow related endpoints. Obtained from [`Client::escrows`].
#[derive(Debug)]
pub struct EscrowsService<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> EscrowsService<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// List the caller's open escrows, in server order.
    pub fn list(&self) -> Result<Vec<Escrow>> {
        self.list_with_response().map(|(escrows, _)| escrows)
    }

    /// Like [`list`](Self::list), also returning the raw response.
    pub fn list_with_response(&self) -> Result<(Vec<Escrow>, Response)> {
        let request = self.client.new_request(HttpMethod::Get, "api/escrows")?;
        let (response, envelope) = self.client.execute_decode::<EscrowList, serde_json::Value>(&request)?;
        let escrows = envelope
            .data
            .escrow_list
            .unwrap_or_default()
            .into_iter()
            .map(into_escrow)
            .collect();
        Ok((escrows, response))
    }

    /// Release an escrow by POSTing to its release URL.
    ///
    /// The escrow must come from [`list`](Self::list); otherwise no request
    /// is sent and [`Error::Precondition`] is returned. The returned
    /// response carries the server's confirmation body.
    pub fn release(&self, escrow: &Escrow) -> Result<Response> {
        let url = match escrow.release_url() {
            Some(url) if !url.is_empty() => url,
            _ => {
                return Err(Error::Precondition(
                    "escrow has no release URL; release only escrows obtained from a listing".to_string(),
                ))
            }
        };
        let request = self.client.new_request(HttpMethod::Post, url)?;
        self.client.execute(&request)
    }
}
