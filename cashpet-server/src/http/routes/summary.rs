//! Financial summary endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::SummaryRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::FinancialSummary;

/// GET /users/{user_id}/financial-summary/
async fn financial_summary(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<FinancialSummary>, ApiError> {
    let summary = SummaryRepo::new(&state.pool).for_user(user_id).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users/{user_id}/financial-summary/", get(financial_summary))
}
