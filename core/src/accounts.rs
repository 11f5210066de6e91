//! Account lookups.

use crate::client::Client;
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::response::Response;
use crate::types::Account;

/// Account related endpoints. Obtained from [`Client::accounts`].
#[derive(Debug)]
pub struct AccountsService<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> AccountsService<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Fetch an account by username. An empty username fetches the account
    /// the transport is authenticated as.
    pub fn get(&self, username: &str) -> Result<Account> {
        self.get_with_response(username).map(|(account, _)| account)
    }

    /// Like [`get`](Self::get), also returning the raw response.
    pub fn get_with_response(&self, username: &str) -> Result<(Account, Response)> {
        let request = self.client.new_request(HttpMethod::Get, &account_path(username))?;
        let (response, envelope) = self.client.execute_decode::<Account, serde_json::Value>(&request)?;
        Ok((envelope.data, response))
    }
}

fn account_path(username: &str) -> String {
    if username.is_empty() {
        "api/myself".to_string()
    } else {
        format!("api/account_info/{}", urlencoding::encode(username))
    }
}
