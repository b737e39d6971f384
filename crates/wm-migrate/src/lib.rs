//! wm-migrate - Migration engine for Waymark
//!
//! Discovers `<version>_<name>.<direction>.sql` files, plans which of them
//! to run for a direction and target version, executes them against a
//! [`wm_db::Database`], tracks applied migrations in a ledger table, and
//! scaffolds new migration pairs.

pub mod error;
pub mod executor;
pub mod ledger;
pub mod migrator;
pub mod planner;
pub mod record;
pub mod scaffold;
pub mod splitter;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use error::{MigrateError, MigrateResult, Stage};
pub use executor::{ExecutionReport, Executor};
pub use ledger::{AppliedMigration, Ledger};
pub use migrator::{MigrationState, MigrationStatus, Migrator, MigratorSettings};
pub use planner::{select, Plan, Planner};
pub use record::MigrationRecord;
pub use scaffold::{scaffold, scaffold_now, ScaffoldedPair};
pub use splitter::{split_statements, StatementSplitter};
pub use store::MigrationStore;
