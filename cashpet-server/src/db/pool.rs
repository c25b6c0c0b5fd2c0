//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use crate::config::DatabaseSettings;

/// Create a PostgreSQL connection pool from settings.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseSettings::from_env()).await?;
/// ```
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(settings.connect_options()?, settings.max_connections).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `options` - Parsed connection options
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create the application database when the server does not have it yet.
///
/// Connects to the maintenance database (`postgres`) and checks
/// `pg_database`. Returns `true` if the database was created.
pub async fn ensure_database_exists(settings: &DatabaseSettings) -> Result<bool, sqlx::Error> {
    let name = settings.database_name();
    let mut conn = settings.maintenance_options()?.connect().await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&name)
            .fetch_one(&mut conn)
            .await?;

    if exists {
        tracing::info!(database = %name, "Database already exists");
        return Ok(false);
    }

    // CREATE DATABASE must not run inside a transaction block
    let statement = format!("CREATE DATABASE {}", quote_ident(&name));
    sqlx::raw_sql(&statement).execute(&mut conn).await?;
    tracing::info!(database = %name, "Created database");

    Ok(true)
}

/// Quote an SQL identifier, doubling embedded quotes.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
