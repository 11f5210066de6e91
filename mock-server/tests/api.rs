use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Market, ACCESS_TOKEN, ERROR_CODE_NOT_FOUND, ERROR_CODE_UNAUTHORIZED};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {ACCESS_TOKEN}"))
        .header(http::header::HOST, "mock.test")
        .body(String::new())
        .unwrap()
}

fn anonymous(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

// --- accounts ---

#[tokio::test]
async fn myself_returns_owner_in_envelope() {
    let resp = app().oneshot(authed("GET", "/api/myself")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["username"], "foo");
    assert_eq!(body["data"]["trading_partners_count"], 5);
}

#[tokio::test]
async fn myself_without_token_is_unauthorized() {
    let resp = app().oneshot(anonymous("GET", "/api/myself")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["error_code"], ERROR_CODE_UNAUTHORIZED);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn account_info_is_public() {
    let resp = app().oneshot(anonymous("GET", "/api/account_info/zrl")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["username"], "zrl");
    assert_eq!(body["data"]["url"], "https://localbitcoins.com/p/zrl/");
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let resp = app().oneshot(anonymous("GET", "/api/account_info/nobody")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["error_code"], ERROR_CODE_NOT_FOUND);
}

// --- escrows ---

#[tokio::test]
async fn escrow_list_is_doubly_enveloped() {
    let resp = app().oneshot(authed("GET", "/api/escrows")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let list = body["data"]["escrow_list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["data"]["buyer_username"], "zrl");
    assert_eq!(list[0]["data"]["amount"], "105.55");
    assert_eq!(list[0]["actions"]["release_url"], "http://mock.test/api/escrow_release/1");
    assert!(list[0]["data"].get("release_url").is_none());
}

#[tokio::test]
async fn empty_market_lists_no_escrows() {
    let resp = app_with(Market::new("foo"))
        .oneshot(authed("GET", "/api/escrows"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["escrow_list"], serde_json::json!([]));
}

#[tokio::test]
async fn escrow_list_requires_token() {
    let resp = app().oneshot(anonymous("GET", "/api/escrows")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn release_unknown_escrow_is_not_found() {
    let resp = app().oneshot(authed("POST", "/api/escrow_release/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["error_code"], ERROR_CODE_NOT_FOUND);
}

// --- full release lifecycle ---

#[tokio::test]
async fn release_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // release escrow 1
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("POST", "/api/escrow_release/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "Success!");

    // list — only escrow 2 remains
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", "/api/escrows"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let list = body["data"]["escrow_list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["actions"]["release_url"], "http://mock.test/api/escrow_release/2");

    // release escrow 1 again — gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("POST", "/api/escrow_release/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
