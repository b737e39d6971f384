//! Error types for the migration engine.

use std::fmt;
use thiserror::Error;
use wm_core::CoreError;
use wm_db::DbError;

/// Phase of a migration run an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading config or validating caller input
    Configuration,
    /// Walking the migrations directory and reading files
    Discovery,
    /// Turning file names into versions
    Parsing,
    /// Selecting and ordering migrations
    Planning,
    /// Running migration SQL
    Execution,
    /// Reading or writing the applied-migration ledger
    Ledger,
    /// Creating new migration files
    Scaffolding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Configuration => "configuration",
            Stage::Discovery => "discovery",
            Stage::Parsing => "parsing",
            Stage::Planning => "planning",
            Stage::Execution => "execution",
            Stage::Ledger => "ledger",
            Stage::Scaffolding => "scaffolding",
        };
        f.write_str(s)
    }
}

/// Migration engine errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Directory traversal or file read failed (M001)
    #[error("[M001] Failed to read migrations at '{path}': {source}")]
    Discovery {
        path: String,
        source: std::io::Error,
    },

    /// A file matched the direction suffix but its name is malformed (M002)
    #[error("[M002] Invalid migration file '{path}': {source}")]
    InvalidFileName {
        path: String,
        #[source]
        source: CoreError,
    },

    /// Two files share the same `<version>_<name>` identity (M003)
    #[error("[M003] Duplicate migration '{id}' in {path1} and {path2}")]
    DuplicateMigration {
        id: String,
        path1: String,
        path2: String,
    },

    /// A statement failed while applying a migration (M004)
    #[error(
        "[M004] Migration step {step} of {total} ({file}) failed at {}: {source}",
        describe_statement(.statement_index)
    )]
    Execution {
        step: usize,
        total: usize,
        file: String,
        statement_index: Option<usize>,
        statement: String,
        #[source]
        source: DbError,
    },

    /// Ledger table access failed (M005)
    #[error("[M005] Ledger {operation} failed: {source}")]
    Ledger {
        operation: String,
        #[source]
        source: DbError,
    },

    /// BEGIN / COMMIT / ROLLBACK failed (M006)
    #[error("[M006] Transaction {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: DbError,
    },

    /// A scaffolded migration file could not be created (M007)
    #[error("[M007] Failed to create migration file '{path}': {source}")]
    Scaffold {
        path: String,
        source: std::io::Error,
    },

    /// Status was requested with the ledger switched off (M008)
    #[error("[M008] Migration status requires the ledger (set ledger.enabled: true)")]
    LedgerDisabled,

    /// Version, direction, name or config error from wm-core
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn describe_statement(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("statement {i}"),
        None => "script".to_string(),
    }
}

impl MigrateError {
    /// The stage this error aborted.
    pub fn stage(&self) -> Stage {
        match self {
            MigrateError::Discovery { .. } => Stage::Discovery,
            MigrateError::InvalidFileName { .. } => Stage::Parsing,
            MigrateError::DuplicateMigration { .. } => Stage::Planning,
            MigrateError::Execution { .. } | MigrateError::Transaction { .. } => Stage::Execution,
            MigrateError::Ledger { .. } | MigrateError::LedgerDisabled => Stage::Ledger,
            MigrateError::Scaffold { .. } => Stage::Scaffolding,
            MigrateError::Core(CoreError::InvalidVersion { .. })
            | MigrateError::Core(CoreError::InvalidFileName { .. }) => Stage::Parsing,
            MigrateError::Core(_) => Stage::Configuration,
        }
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
