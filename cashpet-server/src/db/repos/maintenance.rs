//! Operational queries: connectivity, table listing, reset and sample data

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Row};

use super::DbError;
use crate::auth::hash_password;
use crate::db::migrations::TABLES;
use crate::db::pool::quote_ident;
use crate::models::{Password, PetStats};

/// One table in the public schema
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub table_type: String,
    /// Row count; only counted for base tables
    pub row_count: Option<i64>,
}

/// Ids of the rows created by [`MaintenanceRepo::create_sample_data`]
#[derive(Debug, Clone, Serialize)]
pub struct SampleData {
    pub user_id: i64,
    pub username: String,
    pub category_ids: Vec<i64>,
    pub transaction_ids: Vec<i64>,
    pub budget_id: i64,
    pub goal_id: i64,
    pub pet_id: i64,
}

/// Maintenance repository
pub struct MaintenanceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MaintenanceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(self.pool).await?;
        Ok(())
    }

    /// Tables and views in the public schema, with row counts for tables.
    pub async fn table_info(&self) -> Result<Vec<TableInfo>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            r#"
            SELECT table_name::TEXT AS table_name, table_type::TEXT AS table_type
            FROM information_schema.tables
            WHERE table_schema = 'public'
            ORDER BY table_name
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("table_name")?;
            let table_type: String = row.try_get("table_type")?;

            let row_count = if table_type == "BASE TABLE" {
                let count: i64 =
                    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", quote_ident(&name)))
                        .fetch_one(&mut *conn)
                        .await?;
                Some(count)
            } else {
                None
            };

            tables.push(TableInfo {
                name,
                table_type,
                row_count,
            });
        }

        Ok(tables)
    }

    /// Delete every row in every application table and restart id sequences.
    pub async fn reset(&self) -> Result<(), DbError> {
        let tables = TABLES
            .iter()
            .map(|t| quote_ident(t))
            .collect::<Vec<_>>()
            .join(", ");

        sqlx::query(&format!("TRUNCATE {tables} RESTART IDENTITY CASCADE"))
            .execute(self.pool)
            .await?;

        tracing::warn!("Database reset: all application tables truncated");
        Ok(())
    }

    /// Insert a demo user with categories, transactions, a budget, a goal and
    /// a pet (atomic).
    pub async fn create_sample_data(&self) -> Result<SampleData, DbError> {
        let password_hash = hash_password(Password::new("demo-password")?).await?;

        let mut tx = self.pool.begin().await?;

        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ('demo', 'demo@example.com', $1)
            RETURNING user_id
            "#,
        )
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let mut category_ids = Vec::new();
        for (name, kind, description) in [
            ("Salary", "income", "Monthly salary"),
            ("Groceries", "expense", "Food and household"),
            ("Entertainment", "expense", "Cinema, games, going out"),
        ] {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO categories (user_id, name, type, description)
                VALUES ($1, $2, $3, $4)
                RETURNING category_id
                "#,
            )
            .bind(user_id)
            .bind(name)
            .bind(kind)
            .bind(description)
            .fetch_one(&mut *tx)
            .await?;
            category_ids.push(id);
        }
        let (salary, groceries, entertainment) = (category_ids[0], category_ids[1], category_ids[2]);

        let mut transaction_ids = Vec::new();
        for (category_id, amount, description, recurring) in [
            (salary, Decimal::new(150_000, 0), "Salary", Some("monthly")),
            (groceries, Decimal::new(1_500, 0), "Supermarket", None),
            (entertainment, Decimal::new(2_000, 0), "Cinema", None),
        ] {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO transactions
                    (user_id, category_id, amount, description, is_recurring, recurring_frequency)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING transaction_id
                "#,
            )
            .bind(user_id)
            .bind(category_id)
            .bind(amount)
            .bind(description)
            .bind(recurring.is_some())
            .bind(recurring)
            .fetch_one(&mut *tx)
            .await?;
            transaction_ids.push(id);
        }

        let budget_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO budgets (user_id, category_id, amount, period, start_date, end_date)
            VALUES ($1, $2, $3, 'monthly',
                    date_trunc('month', CURRENT_DATE)::DATE,
                    (date_trunc('month', CURRENT_DATE) + INTERVAL '1 month - 1 day')::DATE)
            RETURNING budget_id
            "#,
        )
        .bind(user_id)
        .bind(groceries)
        .bind(Decimal::new(20_000, 0))
        .fetch_one(&mut *tx)
        .await?;

        let goal_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO goals (user_id, name, target_amount, current_amount, deadline)
            VALUES ($1, 'Vacation', $2, $3, CURRENT_DATE + 180)
            RETURNING goal_id
            "#,
        )
        .bind(user_id)
        .bind(Decimal::new(100_000, 0))
        .bind(Decimal::new(50_000, 0))
        .fetch_one(&mut *tx)
        .await?;

        let stats = PetStats::default();
        let pet_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO pets (user_id, name, pet_type, health, happiness, hunger)
            VALUES ($1, 'Barsik', 'cat', $2, $3, $4)
            RETURNING pet_id
            "#,
        )
        .bind(user_id)
        .bind(stats.health)
        .bind(stats.happiness)
        .bind(stats.hunger)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(user_id, "Created sample data");

        Ok(SampleData {
            user_id,
            username: "demo".to_string(),
            category_ids,
            transaction_ids,
            budget_id,
            goal_id,
            pet_id,
        })
    }
}
