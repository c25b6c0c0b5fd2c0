//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Category, CategoryRepo, NewCategory};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{optional_text, CategoryKind, CategoryName, MAX_DESCRIPTION_LEN};

/// Create category request
#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    fn validate(self) -> Result<NewCategory, ApiError> {
        Ok(NewCategory {
            name: CategoryName::new(&self.name)?,
            kind: CategoryKind::parse(&self.kind)?,
            description: optional_text(
                "description",
                self.description.as_deref(),
                MAX_DESCRIPTION_LEN,
            )?,
        })
    }
}

/// Category response
#[derive(Serialize)]
pub struct CategoryResponse {
    pub category_id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            category_id: c.category_id,
            user_id: c.user_id,
            name: c.name,
            kind: c.kind,
            description: c.description,
        }
    }
}

/// POST /users/{user_id}/categories/
async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(req): ValidJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = req.validate()?;
    let created = CategoryRepo::new(&state.pool).create(user_id, category).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(created))))
}

/// GET /users/{user_id}/categories/
async fn list_categories(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = CategoryRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users/{user_id}/categories/",
        get(list_categories).post(create_category),
    )
}
