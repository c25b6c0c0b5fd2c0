//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (default 5 connections) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, ensure_database_exists};
pub use repos::*;
pub use sqlx::PgPool;
