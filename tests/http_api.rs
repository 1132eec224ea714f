//! HTTP surface tests: routing, status mapping, cache headers, and the
//! access log, driven through the production router.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use blobmint::config::ServiceConfig;
use blobmint::http::{AppState, HttpServer};
use blobmint::mint::Minter;
use blobmint::observability::RequestLogger;
use common::{MockChain, TEST_PRIVATE_KEY, TEST_SIGNER_ADDRESS};

fn dev_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.dev = true;
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

fn state(chain: MockChain) -> AppState {
    let minter = Minter::new(
        Arc::new(chain),
        ServiceConfig::default().chain.mint_contract,
        11_155_111,
    );
    AppState {
        minter: Arc::new(minter),
        logger: RequestLogger::stdout(),
    }
}

fn mint_body() -> String {
    json!({
        "pkey": TEST_PRIVATE_KEY,
        "address": TEST_SIGNER_ADDRESS,
    })
    .to_string()
}

fn mint_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/json/mint")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn successful_mint_is_200_with_code_1() {
    let router = HttpServer::build_router(&dev_config(), state(MockChain::healthy()));
    let response = router.oneshot(mint_request(mint_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    let body = json_body(response).await;
    assert_eq!(body["code"], 1);
    assert!(body["txid"].as_str().unwrap().starts_with("0x"));
}

#[tokio::test]
async fn pipeline_failure_is_500_with_its_code() {
    let chain = MockChain::healthy().with_balance(alloy::primitives::U256::ZERO);
    let router = HttpServer::build_router(&dev_config(), state(chain));
    let response = router.oneshot(mint_request(mint_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body = json_body(response).await;
    assert_eq!(body["code"], 6);
    assert!(body.get("txid").is_none());
}

#[tokio::test]
async fn garbage_json_is_the_generic_failure() {
    let router = HttpServer::build_router(&dev_config(), state(MockChain::healthy()));
    let response = router.oneshot(mint_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["code"], 10);
}

#[tokio::test]
async fn oversized_body_is_rejected_with_the_generic_failure() {
    let router = HttpServer::build_router(&dev_config(), state(MockChain::healthy()));
    let oversized = vec![b'x'; 200_001];
    let response = router.oneshot(mint_request(oversized)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["code"], 10);
}

#[tokio::test]
async fn empty_body_reaches_validation_not_decoding() {
    // An empty body decodes as an all-defaults request; the first
    // validation failure is the malformed (empty) address.
    let router = HttpServer::build_router(&dev_config(), state(MockChain::healthy()));
    let response = router.oneshot(mint_request(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn every_request_lands_in_the_access_log() {
    let (logger, mut records) = RequestLogger::capture();
    let chain = MockChain::healthy().with_balance(alloy::primitives::U256::ZERO);
    let minter = Minter::new(
        Arc::new(chain),
        ServiceConfig::default().chain.mint_contract,
        11_155_111,
    );
    let app_state = AppState {
        minter: Arc::new(minter),
        logger,
    };

    let router = HttpServer::build_router(&dev_config(), app_state);
    router.oneshot(mint_request(mint_body())).await.unwrap();

    let record = records.recv().await.unwrap();
    assert_eq!(record.status, 500);
    assert_eq!(record.uri, "/json/mint");
    assert_eq!(record.to_line().trim_end().split(',').count(), 8);
}

#[tokio::test]
async fn spawned_server_answers_over_real_http() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let router = HttpServer::build_router(&dev_config(), state(MockChain::healthy()));
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/json/mint"))
        .json(&json!({
            "pkey": TEST_PRIVATE_KEY,
            "address": TEST_SIGNER_ADDRESS,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 1);
}

#[tokio::test]
async fn unknown_paths_fall_through_to_static_serving() {
    let router = HttpServer::build_router(&dev_config(), state(MockChain::healthy()));
    let request = Request::builder()
        .uri("/no-such-page")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    // no web root in the test environment, so the file service 404s
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
