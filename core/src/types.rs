//! Entities returned by the LocalBitcoins API.
//!
//! # Design
//! Every field is an `Option`: `None` means the API did not send the field,
//! which is different from a zero value. Unset fields are omitted when
//! encoding, and set-but-zero fields are emitted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_util::option_f64_string;

/// A LocalBitcoins account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_partners_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedbacks_unconfirmed_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_volume_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_common_trades: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_trade_count_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_count: Option<i64>,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

/// An escrow as returned by the escrow listing.
///
/// The release URL is not part of the escrow's own JSON. It is taken from
/// the sibling `actions` object by [`EscrowsService::list`](crate::EscrowsService::list)
/// and is the only way to make an escrow releasable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Escrow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(with = "option_f64_string", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(with = "option_f64_string", default, skip_serializing_if = "Option::is_none")]
    pub amount_btc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate_updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub(crate) release_url: Option<String>,
}

impl Escrow {
    /// Server-issued release URL, if this escrow came from a listing.
    pub fn release_url(&self) -> Option<&str> {
        self.release_url.as_deref()
    }

    /// `true` when a non-empty release URL is known.
    pub fn is_releasable(&self) -> bool {
        self.release_url().is_some_and(|url| !url.is_empty())
    }
}

impl fmt::Display for Escrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

/// Render the set fields of an entity as compact JSON.
fn render<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let json = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    f.write_str(&json)
}
