//! Transaction repository
//!
//! Creation checks user and category ownership inside the insert's
//! transaction, so a concurrent delete cannot slip in between.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::categories::ensure_owned_category;
use super::users::ensure_user;
use super::DbError;
use crate::models::{Amount, Period};

const TRANSACTION_COLUMNS: &str = "transaction_id, user_id, category_id, amount, description, \
     date, is_recurring, recurring_frequency";

/// Transaction record from database
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub transaction_id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
}

/// Validated input for a new transaction
#[derive(Debug)]
pub struct NewTransaction {
    pub category_id: i64,
    pub amount: Amount,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_frequency: Option<Period>,
}

/// Transaction repository
pub struct TransactionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TransactionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i64,
        transaction: NewTransaction,
    ) -> Result<Transaction, DbError> {
        let mut tx = self.pool.begin().await?;
        ensure_user(&mut tx, user_id).await?;
        ensure_owned_category(&mut tx, user_id, transaction.category_id).await?;

        let created: Transaction = sqlx::query_as(&format!(
            r#"
            INSERT INTO transactions
                (user_id, category_id, amount, description, date, is_recurring, recurring_frequency)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(transaction.category_id)
        .bind(transaction.amount.value())
        .bind(transaction.description.as_deref())
        .bind(transaction.date)
        .bind(transaction.is_recurring)
        .bind(transaction.recurring_frequency.map(|p| p.as_str()))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(
            user_id,
            transaction_id = created.transaction_id,
            "Recorded transaction"
        );
        Ok(created)
    }

    /// List a user's transactions (empty for unknown users).
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Transaction>, DbError> {
        let transactions = sqlx::query_as(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY transaction_id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(transactions)
    }
}
