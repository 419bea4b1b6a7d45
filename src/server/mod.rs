//! HTTP surface over the data service.
//!
//! - `GET /health`
//! - `GET /api/sources/:source` - one source, `data` is `null` when nothing is available
//! - `GET /api/status` - cache entries and per-source counters
//! - `POST /api/reset` - clear the cache and fetch everything again

use std::net::SocketAddr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::service::{CacheStatus, DataService, SourceStats};
use crate::source::SourceKey;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub entries: Vec<CacheStatus>,
    pub sources: Vec<SourceStats>,
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ConfigError::UnknownSource(_) => (StatusCode::NOT_FOUND, "UNKNOWN_SOURCE"),
            ConfigError::SourceDisabled(_) => (StatusCode::CONFLICT, "SOURCE_DISABLED"),
            ConfigError::Invalid { .. } => (StatusCode::BAD_REQUEST, "INVALID_VALUE"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

pub fn router(service: DataService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sources/:source", get(get_source))
        .route("/api/status", get(get_status))
        .route("/api/reset", post(reset))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(service: DataService, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("📡 Listening on: {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health() -> &'static str {
    "ok"
}

async fn get_source(
    State(service): State<DataService>,
    Path(source): Path<String>,
) -> Result<Response, ConfigError> {
    let key: SourceKey = source.parse()?;

    let response = match service.resolve_key(key).await? {
        // A value already serializes as {"source", "data"}
        Some(value) => Json(value).into_response(),
        None => Json(json!({ "source": key, "data": null })).into_response(),
    };
    Ok(response)
}

async fn get_status(State(service): State<DataService>) -> Json<StatusResponse> {
    Json(StatusResponse {
        entries: service.cache_status(),
        sources: service.source_stats(),
    })
}

async fn reset(State(service): State<DataService>) -> StatusCode {
    service.reset().await;
    StatusCode::NO_CONTENT
}
