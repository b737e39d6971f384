//! wm-core - Core library for Waymark
//!
//! This crate provides the types shared by every Waymark component: migration
//! versions and their canonical text form, directions, the migration file
//! naming scheme, configuration parsing, and small SQL helpers.

pub mod checksum;
pub mod config;
pub mod direction;
pub mod error;
pub mod file_name;
pub mod migration_name;
pub mod sql_utils;
pub mod version;

pub use checksum::compute_checksum;
pub use config::{
    Config, DatabaseConfig, DbType, Dialect, ExecutionConfig, LedgerConfig, ScriptMode,
    TransactionMode,
};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use file_name::{migration_id, version_from_file_name, MigrationFileName};
pub use migration_name::MigrationName;
pub use version::Version;
