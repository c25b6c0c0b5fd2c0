//! Budget repository

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::categories::ensure_owned_category;
use super::users::ensure_user;
use super::DbError;
use crate::models::{Amount, DateRange, Period};

/// Budget record from database
#[derive(Debug, Clone, FromRow)]
pub struct Budget {
    pub budget_id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Validated input for a new budget
#[derive(Debug)]
pub struct NewBudget {
    pub category_id: i64,
    pub amount: Amount,
    pub period: Period,
    pub range: DateRange,
}

/// Budget repository
pub struct BudgetRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BudgetRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, budget: NewBudget) -> Result<Budget, DbError> {
        let mut tx = self.pool.begin().await?;
        ensure_user(&mut tx, user_id).await?;
        ensure_owned_category(&mut tx, user_id, budget.category_id).await?;

        let created: Budget = sqlx::query_as(
            r#"
            INSERT INTO budgets (user_id, category_id, amount, period, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING budget_id, user_id, category_id, amount, period, start_date, end_date
            "#,
        )
        .bind(user_id)
        .bind(budget.category_id)
        .bind(budget.amount.value())
        .bind(budget.period.as_str())
        .bind(budget.range.start())
        .bind(budget.range.end())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// List a user's budgets (empty for unknown users).
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Budget>, DbError> {
        let budgets = sqlx::query_as(
            r#"
            SELECT budget_id, user_id, category_id, amount, period, start_date, end_date
            FROM budgets
            WHERE user_id = $1
            ORDER BY budget_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(budgets)
    }
}
