//! Pet endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::{NewPet, Pet, PetRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{PetName, PetType};

/// Create pet request
#[derive(Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub pet_type: String,
}

/// Pet response
#[derive(Serialize)]
pub struct PetResponse {
    pub pet_id: i64,
    pub user_id: i64,
    pub name: String,
    pub pet_type: String,
    pub health: i32,
    pub happiness: i32,
    pub hunger: i32,
    pub created_at: NaiveDate,
    pub last_fed: Option<DateTime<Utc>>,
    pub last_played: Option<DateTime<Utc>>,
}

impl From<Pet> for PetResponse {
    fn from(p: Pet) -> Self {
        Self {
            pet_id: p.pet_id,
            user_id: p.user_id,
            name: p.name,
            pet_type: p.pet_type,
            health: p.health,
            happiness: p.happiness,
            hunger: p.hunger,
            created_at: p.created_at,
            last_fed: p.last_fed,
            last_played: p.last_played,
        }
    }
}

/// POST /users/{user_id}/pets/ - adopt a pet with default stats
async fn create_pet(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(req): ValidJson<CreatePetRequest>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let pet = NewPet {
        name: PetName::new(&req.name)?,
        pet_type: PetType::new(&req.pet_type)?,
    };
    let created = PetRepo::new(&state.pool).create(user_id, pet).await?;

    Ok((StatusCode::CREATED, Json(PetResponse::from(created))))
}

/// GET /users/{user_id}/pets/
async fn list_pets(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<PetResponse>>, ApiError> {
    let pets = PetRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(pets.into_iter().map(PetResponse::from).collect()))
}

/// GET /pets/{pet_id}
async fn get_pet(
    State(state): State<Arc<AppState>>,
    ValidId(pet_id): ValidId,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = PetRepo::new(&state.pool).get(pet_id).await?;
    Ok(Json(PetResponse::from(pet)))
}

/// Pet routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/pets/", get(list_pets).post(create_pet))
        .route("/pets/{pet_id}", get(get_pet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::test_support::{lazy_app, send};

    #[tokio::test]
    async fn overlong_pet_type_is_400() {
        let body = format!(r#"{{"name": "Rex", "pet_type": "{}"}}"#, "d".repeat(21));
        let (status, json) = send(lazy_app(false), "POST", "/users/1/pets/", Some(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }
}
