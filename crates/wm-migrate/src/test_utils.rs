//! In-memory `Database` fake that records every call.

use std::cell::RefCell;
use wm_db::{Database, DbError, DbResult};

/// One call made against a [`RecordingDatabase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Execute(String),
    ExecuteWith(String, Vec<String>),
    Batch(String),
    Begin,
    Commit,
    Rollback,
}

/// Records calls instead of running them. Any `execute`/`execute_batch`
/// whose SQL contains `fail_marker` fails with an execution error (and is
/// still recorded as attempted).
#[derive(Debug, Default)]
pub(crate) struct RecordingDatabase {
    calls: RefCell<Vec<Call>>,
    fail_marker: Option<String>,
}

impl RecordingDatabase {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(marker: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_marker: Some(marker.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Every `execute`/`execute_with`/`execute_batch` call, in order.
    pub(crate) fn sql_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Execute(_) | Call::ExecuteWith(..) | Call::Batch(_)))
            .collect()
    }

    fn check(&self, sql: &str) -> DbResult<()> {
        match &self.fail_marker {
            Some(marker) if sql.contains(marker.as_str()) => {
                Err(DbError::ExecutionError(format!("forced failure: {sql}")))
            }
            _ => Ok(()),
        }
    }
}

impl Database for RecordingDatabase {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        self.calls.borrow_mut().push(Call::Execute(sql.to_string()));
        self.check(sql)?;
        Ok(0)
    }

    fn execute_with(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        self.calls.borrow_mut().push(Call::ExecuteWith(
            sql.to_string(),
            params.iter().map(|p| p.to_string()).collect(),
        ));
        self.check(sql)?;
        Ok(0)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.calls.borrow_mut().push(Call::Batch(sql.to_string()));
        self.check(sql)
    }

    fn query_rows(&self, _sql: &str) -> DbResult<Vec<Vec<Option<String>>>> {
        Ok(Vec::new())
    }

    fn relation_exists(&self, _name: &str) -> DbResult<bool> {
        Ok(false)
    }

    fn begin(&self) -> DbResult<()> {
        self.calls.borrow_mut().push(Call::Begin);
        Ok(())
    }

    fn commit(&self) -> DbResult<()> {
        self.calls.borrow_mut().push(Call::Commit);
        Ok(())
    }

    fn rollback(&self) -> DbResult<()> {
        self.calls.borrow_mut().push(Call::Rollback);
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}
