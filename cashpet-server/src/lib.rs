//! cashpet-server: HTTP API for personal finances and a virtual pet
//!
//! Users track income, expenses, budgets and savings goals; each user can
//! also keep pets whose stats change through recorded actions.

pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::DatabaseSettings;
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
