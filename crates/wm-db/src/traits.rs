//! Database trait definition

use crate::error::DbResult;

/// Database abstraction used by the migration engine.
///
/// Every call blocks until the driver returns. Implementations report
/// per-call success or failure; they never retry.
pub trait Database {
    /// Execute a single SQL statement, returning affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute a single statement with `?` placeholders bound to `params`
    fn execute_with(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Execute a script that may contain several statements in one call
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return every row with each column rendered as text.
    /// SQL `NULL` becomes `None`.
    fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<Option<String>>>>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Start a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
