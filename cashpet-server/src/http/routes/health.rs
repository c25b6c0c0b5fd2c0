//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::repos::MaintenanceRepo;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// `connected`, or `disconnected: <error>`
    pub database: String,
    pub app: &'static str,
    pub version: &'static str,
}

/// GET /health - always 200; database reachability is reported in the body
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match MaintenanceRepo::new(&state.pool).ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            format!("disconnected: {e}")
        }
    };

    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        database,
        app: "CashPet",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
