//! Index endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::http::server::AppState;

/// GET / - app name, version, database and endpoint map
async fn index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "app": "CashPet",
        "version": env!("CARGO_PKG_VERSION"),
        "database": {
            "name": state.database_name,
            "host": state.database_host,
        },
        "endpoints": {
            "health": "/health",
            "database_info": "/db/info",
            "users": "/users/",
            "pets": "/users/{user_id}/pets/",
            "categories": "/users/{user_id}/categories/",
            "transactions": "/users/{user_id}/transactions/",
            "budgets": "/users/{user_id}/budgets/",
            "goals": "/users/{user_id}/goals/",
            "add_money": "/goals/{goal_id}/add-money/?amount=",
            "pet_actions": "/pet_actions/",
            "financial_summary": "/users/{user_id}/financial-summary/",
        }
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
