//! Database operations: info, reset and sample data
//!
//! Reset and sample data are destructive and answer 403 unless the server
//! was started with destructive endpoints enabled.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{MaintenanceRepo, SampleData, TableInfo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Database info response
#[derive(Serialize)]
pub struct DatabaseInfo {
    pub database_name: String,
    pub host: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /db/info - table listing; DB failures are reported with status "error"
async fn info(State(state): State<Arc<AppState>>) -> Json<DatabaseInfo> {
    let (status, tables, error) = match MaintenanceRepo::new(&state.pool).table_info().await {
        Ok(tables) => ("connected", tables, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read database info");
            ("error", Vec::new(), Some(e.to_string()))
        }
    };

    Json(DatabaseInfo {
        database_name: state.database_name.clone(),
        host: state.database_host.clone(),
        status,
        tables,
        error,
    })
}

fn require_destructive(state: &AppState) -> Result<(), ApiError> {
    if state.allow_destructive {
        Ok(())
    } else {
        Err(ApiError::Forbidden {
            reason: "destructive endpoints are disabled".to_string(),
        })
    }
}

/// POST /db/reset - empty every table
async fn reset(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    require_destructive(&state)?;
    MaintenanceRepo::new(&state.pool).reset().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /db/create_sample_data - insert a demo user with related rows
async fn create_sample_data(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SampleData>), ApiError> {
    require_destructive(&state)?;
    let sample = MaintenanceRepo::new(&state.pool).create_sample_data().await?;
    Ok((StatusCode::CREATED, Json(sample)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/database/info", get(info))
        .route("/db/info", get(info))
        .route("/db/reset", post(reset))
        .route("/db/create_sample_data", post(create_sample_data))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::http::routes::test_support::{lazy_app, send};

    #[tokio::test]
    async fn reset_is_forbidden_by_default() {
        let app = lazy_app(false);
        let (status, body) = send(app, "POST", "/db/reset", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
    }

    #[tokio::test]
    async fn sample_data_is_forbidden_by_default() {
        let app = lazy_app(false);
        let (status, _) = send(app, "POST", "/db/create_sample_data", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
