mod error;
mod extractors;
mod fetch;
mod scan;
mod view;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use hunter_common::types::ServiceInfo;
use hunter_config::{init_tracing, AppConfig};
use hunter_detector::{load_detector, Scanner};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::extractors::MAX_UPLOAD_BYTES;
use crate::fetch::CsvFetcher;

#[derive(Clone)]
pub struct AppState {
    pub scanner: Scanner,
    pub fetcher: CsvFetcher,
    pub instance_id: Uuid,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo::new(
        "hunter-api",
        state.scanner.model_name(),
        state.instance_id,
    ))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .merge(scan::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("failed to load config");
    init_tracing(&config.log_level);
    tracing::info!(service = "hunter-api", "starting");

    let detector = load_detector(&config.model_path).expect("failed to load detector");
    let fetcher = CsvFetcher::new(
        Duration::from_secs(config.fetch_timeout_secs),
        MAX_UPLOAD_BYTES,
    )
    .expect("failed to build http client");

    let state = AppState {
        scanner: Scanner::new(Arc::new(detector)),
        fetcher,
        instance_id: Uuid::new_v4(),
    };

    let app = build_router(state);
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
