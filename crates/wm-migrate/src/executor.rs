//! Running a [`Plan`] against a database.
//!
//! Steps run strictly in plan order and execution halts at the first failure.
//! The transaction mode decides how much work a failure rolls back: the whole
//! plan (`batch`), the failing migration (`per_migration`) or nothing (`none`).

use crate::error::{MigrateError, MigrateResult};
use crate::ledger::Ledger;
use crate::planner::Plan;
use crate::record::MigrationRecord;
use crate::splitter::StatementSplitter;
use std::time::{Duration, Instant};
use wm_core::{Direction, ExecutionConfig, ScriptMode, TransactionMode};
use wm_db::{Database, DbError};

/// Outcome of a successful [`Executor::apply`].
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub direction: Direction,
    /// Ids of the migrations applied, in run order
    pub applied: Vec<String>,
    /// Number of database calls made for migration SQL
    pub statements: usize,
    pub elapsed: Duration,
}

/// Applies plans through a [`Database`].
pub struct Executor<'a> {
    db: &'a dyn Database,
    config: ExecutionConfig,
    splitter: StatementSplitter,
    ledger: Option<&'a Ledger>,
}

impl<'a> Executor<'a> {
    pub fn new(db: &'a dyn Database, config: ExecutionConfig) -> Self {
        let splitter = StatementSplitter::new(config.dialect);
        Self {
            db,
            config,
            splitter,
            ledger: None,
        }
    }

    /// Record applied migrations in `ledger` as each step completes.
    pub fn with_ledger(mut self, ledger: &'a Ledger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Run every step of `plan`.
    pub fn apply(&self, plan: &Plan) -> MigrateResult<ExecutionReport> {
        let started = Instant::now();
        let mut report = ExecutionReport {
            direction: plan.direction,
            applied: Vec::with_capacity(plan.len()),
            statements: 0,
            elapsed: Duration::ZERO,
        };

        if plan.is_empty() {
            log::info!("No {} migrations to run", plan.direction);
            return Ok(report);
        }

        let total = plan.len();
        match self.config.transaction {
            TransactionMode::Batch => {
                self.in_transaction(|| self.apply_steps(plan, 0..total, &mut report))?;
            }
            TransactionMode::PerMigration => {
                for index in 0..total {
                    self.in_transaction(|| self.apply_steps(plan, index..index + 1, &mut report))?;
                }
            }
            TransactionMode::None => self.apply_steps(plan, 0..total, &mut report)?,
        }

        report.elapsed = started.elapsed();
        log::info!(
            "{} {} migration(s) in {:.2}s",
            match plan.direction {
                Direction::Up => "Applied",
                Direction::Down => "Reverted",
            },
            report.applied.len(),
            report.elapsed.as_secs_f64()
        );
        Ok(report)
    }

    /// Execute `body` within `BEGIN` / `COMMIT`, rolling back on error.
    fn in_transaction<F>(&self, body: F) -> MigrateResult<()>
    where
        F: FnOnce() -> MigrateResult<()>,
    {
        self.db.begin().map_err(|source| MigrateError::Transaction {
            operation: "BEGIN".to_string(),
            source,
        })?;

        let result = body();

        match &result {
            Ok(()) => {
                if let Err(source) = self.db.commit() {
                    self.rollback_quietly();
                    return Err(MigrateError::Transaction {
                        operation: "COMMIT".to_string(),
                        source,
                    });
                }
            }
            Err(_) => self.rollback_quietly(),
        }
        result
    }

    fn rollback_quietly(&self) {
        if let Err(e) = self.db.rollback() {
            log::warn!("Rollback failed: {e}");
        }
    }

    fn apply_steps(
        &self,
        plan: &Plan,
        range: std::ops::Range<usize>,
        report: &mut ExecutionReport,
    ) -> MigrateResult<()> {
        let total = plan.len();
        for index in range {
            let record = &plan.steps[index];
            log::info!(
                "[{}/{}] {} {}",
                index + 1,
                total,
                record.direction.verb(),
                record.file_name()
            );
            report.statements += self.run_script(index + 1, total, record)?;
            self.update_ledger(record)?;
            report.applied.push(record.id());
        }
        Ok(())
    }

    /// Send one script to the database, returning the number of calls made.
    fn run_script(&self, step: usize, total: usize, record: &MigrationRecord) -> MigrateResult<usize> {
        let failed = |statement_index: Option<usize>, statement: &str, source: DbError| {
            MigrateError::Execution {
                step,
                total,
                file: record.path.display().to_string(),
                statement_index,
                statement: statement.to_string(),
                source,
            }
        };

        if record.is_blank() {
            log::debug!("{} is empty, nothing to execute", record.file_name());
            return Ok(0);
        }

        match self.config.script_mode(record.direction) {
            ScriptMode::Batch => {
                self.db
                    .execute_batch(&record.script)
                    .map_err(|e| failed(None, &record.script, e))?;
                Ok(1)
            }
            ScriptMode::Statements => {
                let statements = self.splitter.split(&record.script);
                for (i, statement) in statements.iter().enumerate() {
                    log::debug!("Executing statement {}/{}", i + 1, statements.len());
                    self.db
                        .execute(statement)
                        .map_err(|e| failed(Some(i + 1), statement, e))?;
                }
                Ok(statements.len())
            }
        }
    }

    fn update_ledger(&self, record: &MigrationRecord) -> MigrateResult<()> {
        let Some(ledger) = self.ledger else {
            return Ok(());
        };
        match record.direction {
            Direction::Up => ledger.record(self.db, record),
            Direction::Down => ledger.remove(self.db, &record.version, &record.name),
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
