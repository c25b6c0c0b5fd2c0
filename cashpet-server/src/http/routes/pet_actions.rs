//! Pet action endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::{NewPetAction, PetAction, PetActionRepo, PetRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{ActionType, StatDeltas};

/// Create pet action request; omitted changes count as zero
#[derive(Deserialize)]
pub struct CreatePetActionRequest {
    pub pet_id: i64,
    pub action_type: String,
    #[serde(default)]
    pub happiness_change: i32,
    #[serde(default)]
    pub health_change: i32,
    #[serde(default)]
    pub hunger_change: i32,
}

/// Pet action response
#[derive(Serialize)]
pub struct PetActionResponse {
    pub action_id: i64,
    pub pet_id: i64,
    pub user_id: i64,
    pub action_type: String,
    pub action_date: DateTime<Utc>,
    pub happiness_change: i32,
    pub health_change: i32,
    pub hunger_change: i32,
}

impl From<PetAction> for PetActionResponse {
    fn from(a: PetAction) -> Self {
        Self {
            action_id: a.action_id,
            pet_id: a.pet_id,
            user_id: a.user_id,
            action_type: a.action_type,
            action_date: a.action_date,
            happiness_change: a.happiness_change,
            health_change: a.health_change,
            hunger_change: a.hunger_change,
        }
    }
}

/// POST /pet_actions/ - record an action and apply it to the pet
async fn create_action(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePetActionRequest>,
) -> Result<(StatusCode, Json<PetActionResponse>), ApiError> {
    let action = NewPetAction {
        pet_id: req.pet_id,
        action_type: ActionType::new(&req.action_type)?,
        deltas: StatDeltas {
            health: req.health_change,
            happiness: req.happiness_change,
            hunger: req.hunger_change,
        },
    };
    let created = PetActionRepo::new(&state.pool).create(action).await?;

    Ok((StatusCode::CREATED, Json(PetActionResponse::from(created))))
}

/// GET /pets/{pet_id}/actions/ - 404 for an unknown pet
async fn list_actions(
    State(state): State<Arc<AppState>>,
    ValidId(pet_id): ValidId,
) -> Result<Json<Vec<PetActionResponse>>, ApiError> {
    PetRepo::new(&state.pool).get(pet_id).await?;
    let actions = PetActionRepo::new(&state.pool).list_for_pet(pet_id).await?;
    Ok(Json(actions.into_iter().map(PetActionResponse::from).collect()))
}

/// Pet action routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pet_actions/", post(create_action))
        .route("/pets/{pet_id}/actions/", get(list_actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::test_support::{lazy_app, send};

    #[tokio::test]
    async fn empty_action_type_is_400() {
        let (status, body) = send(
            lazy_app(false),
            "POST",
            "/pet_actions/",
            Some(r#"{"pet_id": 1, "action_type": "  ", "happiness_change": 5}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn non_json_body_is_400() {
        let (status, body) = send(lazy_app(false), "POST", "/pet_actions/", Some("feed")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }
}
