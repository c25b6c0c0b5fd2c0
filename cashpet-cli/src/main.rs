//! cashpet CLI - runs the personal finance and virtual pet API
//!
//! - `serve`: bootstrap the database and run the HTTP server
//! - `migrate`: create the database and tables without serving
//! - `config`: inspect the effective configuration

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "cashpet",
    author,
    version,
    about = "Personal finance tracker with a virtual pet",
    long_about = "Track income, expenses, budgets and savings goals over a JSON HTTP API, \
                  and keep a pet whose mood follows how you care for it."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database and tables, then exit
    Migrate(commands::migrate::MigrateArgs),
    /// Show configuration file path or effective settings
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Config(args) => config::run_config(args)?,
    }

    Ok(())
}
