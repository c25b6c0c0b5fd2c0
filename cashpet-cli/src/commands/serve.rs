//! HTTP server command
//!
//! Bootstraps the database (create if missing, then tables) and serves the
//! API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use cashpet_server::db::{create_pool, ensure_database_exists, migrations, PgPool};
use cashpet_server::http::run_server;
use cashpet_server::DatabaseSettings;

use crate::config::CashpetConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000, or CASHPET_BIND)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Enable /db/reset and /db/create_sample_data
    #[arg(long)]
    pub allow_destructive: bool,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Skip creating the database when it does not exist
    #[arg(long)]
    pub no_create_database: bool,
}

impl ServeArgs {
    /// Apply flags on top of file + environment configuration.
    fn apply(&self, config: &mut CashpetConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        config.server.cors_permissive |= self.cors_permissive;
        config.server.allow_destructive |= self.allow_destructive;
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = CashpetConfig::load()?;
    args.apply(&mut config);

    let pool = bootstrap(&config.database, !args.no_create_database).await?;

    tracing::info!(
        database = %config.database.database_name(),
        host = %config.database.database_host(),
        "Starting cashpet server on {}",
        config.server.bind
    );

    // Run server (blocks until shutdown)
    run_server(pool, &config.database, config.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

/// Create the database if asked, open the pool and create tables.
pub(crate) async fn bootstrap(
    settings: &DatabaseSettings,
    create_database: bool,
) -> Result<PgPool> {
    if create_database {
        ensure_database_exists(settings)
            .await
            .context("Failed to create database (use --no-create-database to skip)")?;
    }

    let pool = create_pool(settings)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to create tables")?;

    Ok(pool)
}
