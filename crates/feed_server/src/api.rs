//! HTTP handlers for the feed service

use crate::models::{ErrorBody, SignFeedRequest, StatusResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use feed_core::{generate_feed, FeedRecord, FeedSigner, FeedValues};

/// GET /feed - the current signed price feed record
pub async fn get_feed(
    State(state): State<AppState>,
) -> Result<Json<FeedRecord>, (StatusCode, Json<ErrorBody>)> {
    let latest = state.latest.read().await;
    match latest.as_ref() {
        Some(attestation) => Ok(Json(attestation.to_record())),
        None => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody::new("no feed published yet")),
        )),
    }
}

/// POST /feed/sign - sign an explicit set of feed values
pub async fn sign_feed(
    State(state): State<AppState>,
    Json(request): Json<SignFeedRequest>,
) -> Result<Json<FeedRecord>, (StatusCode, Json<ErrorBody>)> {
    let values = FeedValues::new(
        request.block_number,
        request.nonce,
        request.ask_for_1000,
        request.bid_for_1000,
    );
    match generate_feed(&values, state.signer.as_ref()) {
        Ok(attestation) => Ok(Json(attestation.to_record())),
        Err(e) => {
            tracing::warn!("sign request rejected: {e}");
            Err((StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))))
        }
    }
}

/// GET /status - liveness and the signer identity
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let feed_published = state.latest.read().await.is_some();
    Json(StatusResponse {
        status: "ok".to_string(),
        signer: format!("0x{}", hex::encode(state.signer.address())),
        feed_published,
    })
}
