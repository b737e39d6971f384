//! The applied-migration ledger.
//!
//! One row per applied migration, keyed on `(version, name)`. Rows are written
//! on the same connection (and inside the same transaction) as the migration
//! SQL they describe.

use crate::error::{MigrateError, MigrateResult};
use crate::record::MigrationRecord;
use std::collections::HashSet;
use wm_core::sql_utils::{quote_ident, quote_qualified, split_qualified_name};
use wm_core::{migration_id, Version};
use wm_db::Database;

/// A ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: Version,
    pub name: String,
    /// SHA-256 of the up script at the time it was applied
    pub checksum: String,
    /// Timestamp text as rendered by the database
    pub applied_at: String,
}

impl AppliedMigration {
    pub fn id(&self) -> String {
        migration_id(&self.version, &self.name)
    }
}

/// Reads and writes the ledger table.
#[derive(Debug, Clone)]
pub struct Ledger {
    table: String,
}

impl Ledger {
    /// `table` may be schema-qualified (`ops.schema_migrations`).
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Whether the ledger table has been created yet.
    pub fn exists(&self, db: &dyn Database) -> MigrateResult<bool> {
        db.relation_exists(&self.table)
            .map_err(ledger_error("lookup"))
    }

    /// Create the ledger table (and its schema) if missing.
    pub fn ensure_table(&self, db: &dyn Database) -> MigrateResult<()> {
        db.execute_batch(&self.create_table_sql())
            .map_err(ledger_error("create"))
    }

    /// All ledger rows ordered by version then name.
    ///
    /// A missing table reads as empty.
    pub fn applied(&self, db: &dyn Database) -> MigrateResult<Vec<AppliedMigration>> {
        if !self.exists(db)? {
            return Ok(Vec::new());
        }

        let rows = db
            .query_rows(&self.select_sql())
            .map_err(ledger_error("read"))?;

        let mut applied = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cols = row.into_iter();
            let mut next = || cols.next().flatten().unwrap_or_default();
            let (version, name, checksum, applied_at) = (next(), next(), next(), next());
            applied.push(AppliedMigration {
                version: Version::parse(&version)?,
                name,
                checksum,
                applied_at,
            });
        }
        Ok(applied)
    }

    /// Ids (`<version>_<name>`) of every applied migration.
    pub fn applied_ids(&self, db: &dyn Database) -> MigrateResult<HashSet<String>> {
        Ok(self.applied(db)?.iter().map(AppliedMigration::id).collect())
    }

    /// Record `record` as applied.
    pub fn record(&self, db: &dyn Database, record: &MigrationRecord) -> MigrateResult<()> {
        let version = record.version.to_string();
        let checksum = record.checksum();
        let params = [version.as_str(), record.name.as_str(), checksum.as_str()];
        db.execute_with(&self.insert_sql(), &params)
            .map(|_| ())
            .map_err(ledger_error("insert"))
    }

    /// Remove the row for `version`/`name`.
    pub fn remove(&self, db: &dyn Database, version: &Version, name: &str) -> MigrateResult<()> {
        let version = version.to_string();
        db.execute_with(&self.delete_sql(), &[version.as_str(), name])
            .map(|_| ())
            .map_err(ledger_error("delete"))
    }

    fn create_table_sql(&self) -> String {
        let (schema, _) = split_qualified_name(&self.table);
        let mut sql = String::new();
        if self.table.contains('.') {
            sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {};\n", quote_ident(schema)));
        }
        sql.push_str(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
    version    VARCHAR NOT NULL,
    name       VARCHAR NOT NULL,
    checksum   VARCHAR NOT NULL,
    applied_at TIMESTAMP NOT NULL DEFAULT now(),
    PRIMARY KEY (version, name)
);",
            quote_qualified(&self.table)
        ));
        sql
    }

    fn select_sql(&self) -> String {
        format!(
            "SELECT version, name, checksum, CAST(applied_at AS VARCHAR) FROM {} ORDER BY version, name",
            quote_qualified(&self.table)
        )
    }

    fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} (version, name, checksum) VALUES (?, ?, ?)",
            quote_qualified(&self.table)
        )
    }

    fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM {} WHERE version = ? AND name = ?",
            quote_qualified(&self.table)
        )
    }
}

fn ledger_error(operation: &'static str) -> impl FnOnce(wm_db::DbError) -> MigrateError {
    move |source| MigrateError::Ledger {
        operation: operation.to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
