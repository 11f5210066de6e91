//! In-process stand-in for the LocalBitcoins API.
//!
//! Serves the same envelopes, error bodies and release URLs as the real
//! service, backed by an in-memory [`Market`]. Endpoints that need a
//! logged-in user expect `Authorization: Bearer <token>`.

use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const ACCESS_TOKEN: &str = "mock-access-token";

pub const ERROR_CODE_UNAUTHORIZED: i64 = 3;
pub const ERROR_CODE_NOT_FOUND: i64 = 14;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    pub trading_partners_count: u32,
    pub feedbacks_unconfirmed_count: u32,
    pub trade_volume_text: String,
    pub has_common_trades: bool,
    pub confirmed_trade_count_text: String,
    pub blocked_count: u32,
    pub feedback_count: u32,
    pub url: String,
    pub trusted_count: u32,
}

impl AccountRecord {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            trading_partners_count: 0,
            feedbacks_unconfirmed_count: 0,
            trade_volume_text: "Less than 25 BTC".to_string(),
            has_common_trades: false,
            confirmed_trade_count_text: "0".to_string(),
            blocked_count: 0,
            feedback_count: 0,
            url: format!("https://localbitcoins.com/p/{username}/"),
            trusted_count: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EscrowRecord {
    pub created_at: String,
    pub buyer_username: String,
    pub reference_code: String,
    pub currency: String,
    pub amount: String,
    pub amount_btc: String,
    pub exchange_rate_updated_at: String,
}

/// Server state: one logged-in owner, known accounts and open escrows.
#[derive(Clone, Debug)]
pub struct Market {
    pub owner: String,
    pub token: String,
    pub accounts: HashMap<String, AccountRecord>,
    pub escrows: BTreeMap<u64, EscrowRecord>,
}

impl Market {
    pub fn new(owner: &str) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(owner.to_string(), AccountRecord::new(owner));
        Self {
            owner: owner.to_string(),
            token: ACCESS_TOKEN.to_string(),
            accounts,
            escrows: BTreeMap::new(),
        }
    }

    pub fn with_account(mut self, account: AccountRecord) -> Self {
        self.accounts.insert(account.username.clone(), account);
        self
    }

    pub fn with_escrow(mut self, id: u64, escrow: EscrowRecord) -> Self {
        self.escrows.insert(id, escrow);
        self
    }

    /// Owner `foo` with a trading history, a counterparty `zrl` and two
    /// open escrows.
    pub fn seeded() -> Self {
        let foo = AccountRecord {
            trading_partners_count: 5,
            feedbacks_unconfirmed_count: 2,
            trusted_count: 2,
            ..AccountRecord::new("foo")
        };
        Self::new("foo")
            .with_account(foo)
            .with_account(AccountRecord::new("zrl"))
            .with_escrow(1, escrow("zrl", "L1", "EUR", "105.55", "1.23"))
            .with_escrow(2, escrow("bar", "L2", "USD", "20.00", "0.25"))
    }
}

fn escrow(buyer: &str, reference: &str, currency: &str, amount: &str, amount_btc: &str) -> EscrowRecord {
    EscrowRecord {
        created_at: "2013-06-20T15:23:01+00:00".to_string(),
        buyer_username: buyer.to_string(),
        reference_code: reference.to_string(),
        currency: currency.to_string(),
        amount: amount.to_string(),
        amount_btc: amount_btc.to_string(),
        exchange_rate_updated_at: "2013-06-20T15:23:01+00:00".to_string(),
    }
}

pub type Db = Arc<RwLock<Market>>;

/// Error answer in the API's `{"error": {"message", "error_code"}}` shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
    code: i64,
}

impl ApiFailure {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid or missing access token".to_string(),
            code: ERROR_CODE_UNAUTHORIZED,
        }
    }

    fn not_found(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} not found"),
            code: ERROR_CODE_NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({"error": {"message": self.message, "error_code": self.code}});
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    app_with(Market::seeded())
}

pub fn app_with(market: Market) -> Router {
    let db: Db = Arc::new(RwLock::new(market));
    Router::new()
        .route("/api/myself", get(myself))
        .route("/api/account_info/{username}", get(account_info))
        .route("/api/escrows", get(list_escrows))
        .route("/api/escrow_release/{id}", post(release_escrow))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Market::seeded()).await
}

pub async fn run_with(listener: TcpListener, market: Market) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(market)).await
}

fn authorize(headers: &HeaderMap, market: &Market) -> Result<(), ApiFailure> {
    let expected = format!("Bearer {}", market.token);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(ApiFailure::unauthorized()),
    }
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "data": data }))
}

fn account_json(market: &Market, username: &str) -> Result<Json<Value>, ApiFailure> {
    let account = market
        .accounts
        .get(username)
        .ok_or_else(|| ApiFailure::not_found("account"))?;
    Ok(envelope(json!(account)))
}

async fn myself(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiFailure> {
    let market = db.read().await;
    authorize(&headers, &market)?;
    account_json(&market, &market.owner)
}

async fn account_info(State(db): State<Db>, Path(username): Path<String>) -> Result<Json<Value>, ApiFailure> {
    let market = db.read().await;
    account_json(&market, &username)
}

async fn list_escrows(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, ApiFailure> {
    let market = db.read().await;
    authorize(&headers, &market)?;
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localbitcoins.com");
    let escrow_list: Vec<Value> = market
        .escrows
        .iter()
        .map(|(id, escrow)| {
            json!({
                "data": escrow,
                "actions": { "release_url": format!("http://{host}/api/escrow_release/{id}") },
            })
        })
        .collect();
    Ok(envelope(json!({ "escrow_list": escrow_list })))
}

async fn release_escrow(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<&'static str, ApiFailure> {
    let mut market = db.write().await;
    authorize(&headers, &market)?;
    market.escrows.remove(&id).ok_or_else(|| ApiFailure::not_found("escrow"))?;
    tracing::info!(id, "escrow released");
    Ok("Success!")
}
