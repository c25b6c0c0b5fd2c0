//! Budget endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{Budget, BudgetRepo, NewBudget};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Amount, DateRange, Period};

/// Create budget request
#[derive(Deserialize)]
pub struct CreateBudgetRequest {
    pub category_id: i64,
    pub amount: Decimal,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CreateBudgetRequest {
    fn validate(self) -> Result<NewBudget, ApiError> {
        Ok(NewBudget {
            category_id: self.category_id,
            amount: Amount::new("amount", self.amount)?,
            period: Period::parse("period", &self.period)?,
            range: DateRange::new(self.start_date, self.end_date)?,
        })
    }
}

/// Budget response
#[derive(Serialize)]
pub struct BudgetResponse {
    pub budget_id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        Self {
            budget_id: b.budget_id,
            user_id: b.user_id,
            category_id: b.category_id,
            amount: b.amount,
            period: b.period,
            start_date: b.start_date,
            end_date: b.end_date,
        }
    }
}

/// POST /users/{user_id}/budgets/ - 403 when the category is someone else's
async fn create_budget(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(req): ValidJson<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<BudgetResponse>), ApiError> {
    let budget = req.validate()?;
    let created = BudgetRepo::new(&state.pool).create(user_id, budget).await?;

    Ok((StatusCode::CREATED, Json(BudgetResponse::from(created))))
}

/// GET /users/{user_id}/budgets/
async fn list_budgets(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<BudgetResponse>>, ApiError> {
    let budgets = BudgetRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(budgets.into_iter().map(BudgetResponse::from).collect()))
}

/// Budget routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users/{user_id}/budgets/",
        get(list_budgets).post(create_budget),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::test_support::{lazy_app, send};

    #[tokio::test]
    async fn unknown_period_is_400() {
        let (status, body) = send(
            lazy_app(false),
            "POST",
            "/users/1/budgets/",
            Some(
                r#"{"category_id": 1, "amount": 100, "period": "quarterly",
                    "start_date": "2024-01-01", "end_date": "2024-03-31"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn end_before_start_is_400() {
        let (status, _) = send(
            lazy_app(false),
            "POST",
            "/users/1/budgets/",
            Some(
                r#"{"category_id": 1, "amount": 100, "period": "monthly",
                    "start_date": "2024-02-01", "end_date": "2024-01-01"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
