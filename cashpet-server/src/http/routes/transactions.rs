//! Transaction endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{NewTransaction, Transaction, TransactionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{optional_text, Amount, Period, MAX_DESCRIPTION_LEN};

/// Create transaction request
#[derive(Deserialize)]
pub struct CreateTransactionRequest {
    pub category_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    /// Defaults to today (UTC)
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
}

impl CreateTransactionRequest {
    fn validate(self, today: NaiveDate) -> Result<NewTransaction, ApiError> {
        Ok(NewTransaction {
            category_id: self.category_id,
            amount: Amount::new("amount", self.amount)?,
            description: optional_text(
                "description",
                self.description.as_deref(),
                MAX_DESCRIPTION_LEN,
            )?,
            date: self.date.unwrap_or(today),
            is_recurring: self.is_recurring,
            recurring_frequency: self
                .recurring_frequency
                .as_deref()
                .map(|f| Period::parse("recurring_frequency", f))
                .transpose()?,
        })
    }
}

/// Transaction response
#[derive(Serialize)]
pub struct TransactionResponse {
    pub transaction_id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            transaction_id: t.transaction_id,
            user_id: t.user_id,
            category_id: t.category_id,
            amount: t.amount,
            description: t.description,
            date: t.date,
            is_recurring: t.is_recurring,
            recurring_frequency: t.recurring_frequency,
        }
    }
}

/// POST /users/{user_id}/transactions/ - 403 when the category is someone else's
async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(req): ValidJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let transaction = req.validate(Utc::now().date_naive())?;
    let created = TransactionRepo::new(&state.pool)
        .create(user_id, transaction)
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(created))))
}

/// GET /users/{user_id}/transactions/
async fn list_transactions(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let transactions = TransactionRepo::new(&state.pool)
        .list_for_user(user_id)
        .await?;
    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    ))
}

/// Transaction routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users/{user_id}/transactions/",
        get(list_transactions).post(create_transaction),
    )
}
