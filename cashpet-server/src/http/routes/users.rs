//! User endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::{NewUser, User, UserChanges, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Email, Password, Username};

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Update user request; absent fields are left unchanged
#[derive(Deserialize, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    fn validate(self) -> Result<UserChanges, ApiError> {
        Ok(UserChanges {
            username: self.username.as_deref().map(Username::new).transpose()?,
            email: self.email.as_deref().map(Email::new).transpose()?,
            password: self.password.as_deref().map(Password::new).transpose()?,
            is_active: self.is_active,
        })
    }
}

/// User response (never carries the password hash)
#[derive(Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            email: u.email,
            registration_date: u.registration_date,
            last_login: u.last_login,
            is_active: u.is_active,
        }
    }
}

/// POST /users/ - register a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = NewUser {
        username: Username::new(&req.username)?,
        email: Email::new(&req.email)?,
        password: Password::new(&req.password)?,
    };
    let created = UserRepo::new(&state.pool).create(user).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// GET /users/
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{user_id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{user_id} - partial update
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let changes = req.validate()?;
    let user = UserRepo::new(&state.pool).update(user_id, changes).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{user_id} - removes the user and everything they own
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(&state.pool).delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
