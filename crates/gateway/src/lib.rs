//! HTTP API gateway for Mentora.
//!
//! Exposes a health check plus the v1 REST API: chat, per-user history,
//! and the tool catalog. Built on Axum; one [`Advisor`] instance serves
//! all users of the process.

pub mod api;

use axum::extract::DefaultBodyLimit;
use axum::{Router, response::Json, routing::get};
use mentora_agent::Advisor;
use mentora_config::AppConfig;
use mentora_core::history::HistoryStore;
use mentora_core::profile::ProfileStore;
use mentora_providers::OpenAiCompatDecider;
use mentora_store::{InMemoryStore, SqliteStore};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub advisor: Advisor,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", api::v1_router(state))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Builds the decision service and storage backend once and shares them
/// across all requests.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr = format!("{host}:{port}");

    let decider = Arc::new(OpenAiCompatDecider::from_config(&config)?);

    let (profiles, history): (Arc<dyn ProfileStore>, Arc<dyn HistoryStore>) =
        match config.storage.backend.as_str() {
            "in_memory" => {
                let store = Arc::new(InMemoryStore::new());
                (Arc::clone(&store) as _, store as _)
            }
            _ => {
                let store = Arc::new(SqliteStore::new(&config.resolved_db_path()).await?);
                (Arc::clone(&store) as _, store as _)
            }
        };

    let advisor = Advisor::new(decider, profiles, history, &config);
    let state = Arc::new(GatewayState { advisor });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
