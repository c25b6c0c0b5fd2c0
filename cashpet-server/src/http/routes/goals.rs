//! Goal endpoints

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{Goal, GoalRepo, NewGoal};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Amount, GoalName, ValidationError};

/// Create goal request
#[derive(Deserialize)]
pub struct CreateGoalRequest {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

/// Query string of `PUT /goals/{goal_id}/add-money/`
#[derive(Deserialize)]
pub struct AddMoneyParams {
    pub amount: String,
}

impl AddMoneyParams {
    fn amount(&self) -> Result<Amount, ValidationError> {
        let value = Decimal::from_str(self.amount.trim()).map_err(|_| {
            ValidationError::InvalidFormat {
                field: "amount",
                reason: "must be a decimal number",
            }
        })?;
        Amount::new("amount", value)
    }
}

/// Goal response
#[derive(Serialize)]
pub struct GoalResponse {
    pub goal_id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: NaiveDate,
}

impl From<Goal> for GoalResponse {
    fn from(g: Goal) -> Self {
        Self {
            goal_id: g.goal_id,
            user_id: g.user_id,
            name: g.name,
            target_amount: g.target_amount,
            current_amount: g.current_amount,
            deadline: g.deadline,
            is_completed: g.is_completed,
            created_at: g.created_at,
        }
    }
}

/// POST /users/{user_id}/goals/
async fn create_goal(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(req): ValidJson<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiError> {
    let goal = NewGoal {
        name: GoalName::new(&req.name)?,
        target_amount: Amount::new("target_amount", req.target_amount)?,
        deadline: req.deadline,
    };
    let created = GoalRepo::new(&state.pool).create(user_id, goal).await?;

    Ok((StatusCode::CREATED, Json(GoalResponse::from(created))))
}

/// GET /users/{user_id}/goals/
async fn list_goals(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<GoalResponse>>, ApiError> {
    let goals = GoalRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

/// PUT /goals/{goal_id}/add-money/?amount= - fund a goal, capped at its target
async fn add_money(
    State(state): State<Arc<AppState>>,
    ValidId(goal_id): ValidId,
    params: Result<Query<AddMoneyParams>, QueryRejection>,
) -> Result<Json<GoalResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::Validation(ValidationError::Malformed {
            reason: rejection.body_text(),
        })
    })?;
    let amount = params.amount()?;

    let goal = GoalRepo::new(&state.pool).add_money(goal_id, amount).await?;
    Ok(Json(GoalResponse::from(goal)))
}

/// Goal routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/goals/", get(list_goals).post(create_goal))
        .route("/goals/{goal_id}/add-money/", put(add_money))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::test_support::{lazy_app, send};
    use rust_decimal_macros::dec;

    #[test]
    fn amount_parsing() {
        let params = AddMoneyParams {
            amount: "250.505".into(),
        };
        assert_eq!(params.amount().unwrap().value(), dec!(250.51));

        let params = AddMoneyParams {
            amount: "lots".into(),
        };
        assert!(matches!(
            params.amount(),
            Err(ValidationError::InvalidFormat { field: "amount", .. })
        ));
    }

    #[tokio::test]
    async fn negative_amount_is_400() {
        let (status, body) = send(
            lazy_app(false),
            "PUT",
            "/goals/1/add-money/?amount=-5",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn missing_amount_is_400() {
        let (status, body) = send(lazy_app(false), "PUT", "/goals/1/add-money/", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }
}
