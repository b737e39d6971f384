//! wm-db - Database abstraction layer for Waymark
//!
//! This crate provides the synchronous `Database` trait the migration engine
//! runs against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;

use wm_core::config::{DatabaseConfig, DbType};

/// Open the database described by `config`.
pub fn connect(config: &DatabaseConfig) -> DbResult<Box<dyn Database>> {
    log::debug!("Connecting to {} database at {}", config.db_type, config.path);
    match config.db_type {
        DbType::DuckDb => Ok(Box::new(DuckDbBackend::new(&config.path)?)),
    }
}
