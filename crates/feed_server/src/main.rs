use axum::{
    routing::{get, post},
    Router,
};
use feed_core::FeedSigner;
use feed_server::{api, source, AppConfig, AppState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "feed_server=debug,tower_http=debug,axum=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loading configuration...");
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let signer = match config.build_signer() {
        Ok(signer) => signer,
        Err(e) => {
            tracing::error!("Failed to build feed signer: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Feed signer address: 0x{}", hex::encode(signer.address()));

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid server address: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(config, signer);

    // Keep the published feed current in the background
    source::start_refresher(state.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/feed", get(api::get_feed))
        .route("/feed/sign", post(api::sign_feed))
        .route("/status", get(api::get_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    tracing::info!("Feed server listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
