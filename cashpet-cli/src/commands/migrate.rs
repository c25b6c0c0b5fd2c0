//! Schema bootstrap command

use anyhow::Result;
use clap::Parser;

use super::serve::bootstrap;
use crate::config::CashpetConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Skip creating the database when it does not exist
    #[arg(long)]
    pub no_create_database: bool,
}

/// Create the database and tables, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let mut config = CashpetConfig::load()?;
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let pool = bootstrap(&config.database, !args.no_create_database).await?;
    pool.close().await;

    println!(
        "Schema ready in database '{}'",
        config.database.database_name()
    );
    Ok(())
}
