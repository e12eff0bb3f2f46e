// HTTP API integration tests for the feed server endpoints

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use feed_core::{FeedRecord, FeedSigner};
use feed_server::{api, source, AppConfig, AppState, FeedConfig, ServerConfig};
use tower::util::ServiceExt;

const PASSPHRASE: &str = "some big long brainwallet password";
const SIGNER_ADDRESS: &str = "a5d2ffd4c4c8d10b1f42144281af033abb1858bf";

fn test_state() -> AppState {
    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        feed: FeedConfig {
            private_key: None,
            passphrase: Some(PASSPHRASE.to_string()),
            passphrase_file: None,
            source_url: None,
            static_block_number: 5_392_391,
            static_ask_for_1000: 48_082,
            static_bid_for_1000: 46_440,
            refresh_interval_secs: 300,
        },
    };
    let signer = config.build_signer().unwrap();
    AppState::new(config, signer)
}

fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/feed", get(api::get_feed))
        .route("/feed/sign", post(api::sign_feed))
        .route("/status", get(api::get_status))
        .with_state(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_feed_unavailable_before_first_refresh() {
    let app = test_app(test_state());
    let response = app
        .oneshot(Request::builder().uri("/feed").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_feed_after_refresh_verifies() {
    let state = test_state();
    source::refresh_once(&state).await.unwrap();

    let app = test_app(state.clone());
    let response = app
        .oneshot(Request::builder().uri("/feed").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let record: FeedRecord = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(record.status, "success");
    assert_eq!(record.data.signer, format!("0x{SIGNER_ADDRESS}"));

    let attestation = record.to_attestation().unwrap();
    attestation.verify().unwrap();
    assert_eq!(attestation.signer, state.signer.address());
}

#[tokio::test]
async fn test_sign_endpoint_reproduces_reference_vector() {
    let app = test_app(test_state());
    let request_body = serde_json::json!({
        "block_number": 5392391u64,
        "nonce": 1523036543u64,
        "ask_for_1000": 48082u64,
        "bid_for_1000": 46440u64,
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/feed/sign")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&request_body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["message"],
        "0x0000000000000000000000000000000000000000000000000000000000524807\
         000000000000000000000000000000000000000000000000000000005ac7b17f\
         000000000000000000000000000000000000000000000000000000000000bbd2\
         000000000000000000000000000000000000000000000000000000000000b568"
    );
    assert_eq!(
        body["data"]["hash"],
        "0x3be4c273329379ce924c36048cb39fabb44d53ff6eedc335a7f1efae0d847be9"
    );
    assert_eq!(body["data"]["signer"], format!("0x{SIGNER_ADDRESS}"));
    assert_eq!(body["data"]["v"], 27);
}

#[tokio::test]
async fn test_sign_endpoint_rejects_oversized_value() {
    let app = test_app(test_state());
    // 2^256 does not fit a field
    let mut value = serde_json::json!({
        "block_number": 5392391u64,
        "nonce": 1u64,
        "ask_for_1000": 2u64,
        "bid_for_1000": 3u64,
    });
    value["block_number"] = serde_json::Value::Number(
        "115792089237316195423570985008687907853269984665640564039457584007913129639936"
            .parse()
            .unwrap(),
    );
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/feed/sign")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&value).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_reports_signer_but_never_the_key() {
    let state = test_state();
    let app = test_app(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["signer"], format!("0x{SIGNER_ADDRESS}"));
    assert_eq!(body["feed_published"], false);
    assert!(!body.to_string().contains("57c617d9"));
}
