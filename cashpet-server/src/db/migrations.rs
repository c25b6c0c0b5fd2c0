//! Schema creation
//!
//! Every statement is idempotent (`IF NOT EXISTS`) and runs on startup.
//! Owned rows reference their owner with `ON DELETE CASCADE`, so deleting a
//! user removes everything that belongs to them.

use sqlx::PgPool;

/// Application tables, parents before children.
pub const TABLES: &[&str] = &[
    "users",
    "pets",
    "categories",
    "transactions",
    "budgets",
    "goals",
    "pet_actions",
];

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id BIGSERIAL PRIMARY KEY,
            username VARCHAR(50) NOT NULL,
            email VARCHAR(100) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            registration_date DATE NOT NULL DEFAULT CURRENT_DATE,
            last_login TIMESTAMPTZ,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT users_username_unique UNIQUE (username),
            CONSTRAINT users_email_unique UNIQUE (email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            pet_id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            name VARCHAR(50) NOT NULL,
            pet_type VARCHAR(20) NOT NULL,
            health INTEGER NOT NULL DEFAULT 100 CHECK (health BETWEEN 0 AND 100),
            happiness INTEGER NOT NULL DEFAULT 100 CHECK (happiness BETWEEN 0 AND 100),
            hunger INTEGER NOT NULL DEFAULT 0 CHECK (hunger BETWEEN 0 AND 100),
            created_at DATE NOT NULL DEFAULT CURRENT_DATE,
            last_fed TIMESTAMPTZ,
            last_played TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            category_id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            name VARCHAR(50) NOT NULL,
            type VARCHAR(10) NOT NULL CHECK (type IN ('income', 'expense')),
            description VARCHAR(255)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            transaction_id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            category_id BIGINT NOT NULL REFERENCES categories(category_id) ON DELETE CASCADE,
            amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
            description VARCHAR(255),
            date DATE NOT NULL DEFAULT CURRENT_DATE,
            is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
            recurring_frequency VARCHAR(20)
                CHECK (recurring_frequency IN ('daily', 'weekly', 'monthly', 'yearly'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS budgets (
            budget_id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            category_id BIGINT NOT NULL REFERENCES categories(category_id) ON DELETE CASCADE,
            amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
            period VARCHAR(20) NOT NULL
                CHECK (period IN ('daily', 'weekly', 'monthly', 'yearly')),
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            CHECK (end_date >= start_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS goals (
            goal_id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            name VARCHAR(100) NOT NULL,
            target_amount NUMERIC(14, 2) NOT NULL CHECK (target_amount > 0),
            current_amount NUMERIC(14, 2) NOT NULL DEFAULT 0
                CHECK (current_amount >= 0 AND current_amount <= target_amount),
            deadline DATE,
            is_completed BOOLEAN NOT NULL DEFAULT FALSE,
            created_at DATE NOT NULL DEFAULT CURRENT_DATE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pet_actions (
            action_id BIGSERIAL PRIMARY KEY,
            pet_id BIGINT NOT NULL REFERENCES pets(pet_id) ON DELETE CASCADE,
            user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            action_type VARCHAR(20) NOT NULL,
            action_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            happiness_change INTEGER NOT NULL DEFAULT 0,
            health_change INTEGER NOT NULL DEFAULT 0,
            hunger_change INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_pets_user ON pets(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_categories_user ON categories(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_transactions_user ON transactions(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id)",
        "CREATE INDEX IF NOT EXISTS idx_budgets_user ON budgets(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_goals_open ON goals(user_id) WHERE NOT is_completed",
        "CREATE INDEX IF NOT EXISTS idx_pet_actions_pet ON pet_actions(pet_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
