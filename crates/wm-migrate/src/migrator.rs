//! High-level entry point tying discovery, planning, execution and the
//! ledger together.

use crate::error::{MigrateError, MigrateResult};
use crate::executor::{ExecutionReport, Executor};
use crate::ledger::Ledger;
use crate::planner::{Plan, Planner};
use crate::record::MigrationRecord;
use crate::store::MigrationStore;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use wm_core::file_name::VERSION_SEPARATOR;
use wm_core::{
    Config, CoreResult, Direction, ExecutionConfig, LedgerConfig, Version,
};
use wm_db::Database;

/// Everything a [`Migrator`] needs, resolved up front.
#[derive(Debug, Clone)]
pub struct MigratorSettings {
    pub migrations_dir: PathBuf,
    pub ledger: LedgerConfig,
    pub execution: ExecutionConfig,
}

impl MigratorSettings {
    /// Defaults for a migrations directory.
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
            ledger: LedgerConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }

    /// Resolve settings from a loaded config, relative to the project `root`.
    pub fn from_config(config: &Config, root: &Path, target: Option<&str>) -> CoreResult<Self> {
        Ok(Self {
            migrations_dir: config.migrations_dir_absolute(root, target)?,
            ledger: config.ledger.clone(),
            execution: config.execution.clone(),
        })
    }
}

/// State of one migration as reported by [`Migrator::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MigrationState {
    /// File exists, not in the ledger
    Pending,
    /// In the ledger with a matching checksum
    Applied { applied_at: String },
    /// In the ledger, but the up script changed since
    Modified { applied_at: String },
    /// In the ledger, but the up file is gone
    Missing { applied_at: String },
}

impl MigrationState {
    pub fn label(&self) -> &'static str {
        match self {
            MigrationState::Pending => "pending",
            MigrationState::Applied { .. } => "applied",
            MigrationState::Modified { .. } => "modified",
            MigrationState::Missing { .. } => "missing",
        }
    }

    pub fn applied_at(&self) -> Option<&str> {
        match self {
            MigrationState::Pending => None,
            MigrationState::Applied { applied_at }
            | MigrationState::Modified { applied_at }
            | MigrationState::Missing { applied_at } => Some(applied_at),
        }
    }
}

/// One row of [`Migrator::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub id: String,
    pub version: Version,
    pub name: String,
    #[serde(flatten)]
    pub state: MigrationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Runs migrations from one directory against one database.
pub struct Migrator<'db> {
    db: &'db dyn Database,
    store: MigrationStore,
    ledger: Option<Ledger>,
    execution: ExecutionConfig,
}

impl<'db> Migrator<'db> {
    pub fn new(db: &'db dyn Database, settings: MigratorSettings) -> Self {
        let ledger = settings
            .ledger
            .enabled
            .then(|| Ledger::new(settings.ledger.table));
        Self {
            db,
            store: MigrationStore::new(settings.migrations_dir),
            ledger,
            execution: settings.execution,
        }
    }

    /// Work out what a run would do without executing anything.
    ///
    /// `target` defaults to the current time.
    pub fn plan(&self, direction: Direction, target: Option<Version>) -> MigrateResult<Plan> {
        let target = target.unwrap_or_else(Version::now);
        let records = self.store.discover(direction)?;

        let applied = match &self.ledger {
            Some(ledger) => Some(ledger.applied_ids(self.db)?),
            None => None,
        };

        if let (Direction::Down, Some(applied)) = (direction, &applied) {
            warn_missing_down_files(&records, applied, &target);
        }

        let plan = Planner::new(direction, target).plan(records, applied.as_ref())?;
        log::debug!(
            "Planned {} {} migration(s) against target {}",
            plan.len(),
            direction,
            target
        );
        Ok(plan)
    }

    /// Plan and execute.
    pub fn run(
        &self,
        direction: Direction,
        target: Option<Version>,
    ) -> MigrateResult<ExecutionReport> {
        let plan = self.plan(direction, target)?;
        self.run_plan(&plan)
    }

    /// Parse a direction token and an optional target version.
    ///
    /// An empty target is treated as absent.
    pub fn parse_tokens(
        direction: &str,
        target: Option<&str>,
    ) -> MigrateResult<(Direction, Option<Version>)> {
        let direction = Direction::parse(direction)?;
        let target = match target.filter(|t| !t.is_empty()) {
            Some(text) => Some(Version::parse(text)?),
            None => None,
        };
        Ok((direction, target))
    }

    /// [`parse_tokens`](Self::parse_tokens), then [`run`](Self::run).
    ///
    /// Both inputs are validated before the filesystem or database is
    /// touched.
    pub fn run_tokens(
        &self,
        direction: &str,
        target: Option<&str>,
    ) -> MigrateResult<ExecutionReport> {
        let (direction, target) = Self::parse_tokens(direction, target)?;
        self.run(direction, target)
    }

    /// Execute a plan produced by [`plan`](Self::plan).
    pub fn run_plan(&self, plan: &Plan) -> MigrateResult<ExecutionReport> {
        let executor = Executor::new(self.db, self.execution.clone());
        match &self.ledger {
            Some(ledger) => {
                ledger.ensure_table(self.db)?;
                executor.with_ledger(ledger).apply(plan)
            }
            None => executor.apply(plan),
        }
    }

    /// Every known migration and its ledger state, ordered by version then name.
    pub fn status(&self) -> MigrateResult<Vec<MigrationStatus>> {
        let ledger = self.ledger.as_ref().ok_or(MigrateError::LedgerDisabled)?;
        let records = self.store.discover(Direction::Up)?;
        let mut applied: HashMap<String, _> = ledger
            .applied(self.db)?
            .into_iter()
            .map(|row| (row.id(), row))
            .collect();

        let mut statuses: Vec<MigrationStatus> = records
            .into_iter()
            .map(|record| {
                let id = record.id();
                let state = match applied.remove(&id) {
                    None => MigrationState::Pending,
                    Some(row) if row.checksum == record.checksum() => MigrationState::Applied {
                        applied_at: row.applied_at,
                    },
                    Some(row) => MigrationState::Modified {
                        applied_at: row.applied_at,
                    },
                };
                MigrationStatus {
                    id,
                    version: record.version,
                    name: record.name,
                    state,
                    path: Some(record.path),
                }
            })
            .collect();

        statuses.extend(applied.into_iter().map(|(id, row)| MigrationStatus {
            id,
            version: row.version,
            name: row.name,
            state: MigrationState::Missing {
                applied_at: row.applied_at,
            },
            path: None,
        }));

        statuses.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));
        Ok(statuses)
    }
}

/// An applied migration inside the down range with no down file of the same id.
#[derive(Debug, PartialEq, Eq)]
struct Unrevertable<'a> {
    id: &'a str,
    /// A down file with the same name but another version
    near_miss: Option<&'a MigrationRecord>,
}

/// Down files are matched on the exact id. Pairs whose two files carry
/// different stamps are reported here rather than guessed at.
fn unrevertable<'a>(
    records: &'a [MigrationRecord],
    applied: &'a HashSet<String>,
    target: &Version,
) -> Vec<Unrevertable<'a>> {
    let present: HashSet<String> = records.iter().map(MigrationRecord::id).collect();
    let mut found: Vec<Unrevertable<'a>> = applied
        .iter()
        .filter(|id| !present.contains(id.as_str()))
        .filter_map(|id| {
            let (version, name) = id.split_once(VERSION_SEPARATOR)?;
            let version = Version::parse(version).ok()?;
            version.is_not_before(target).then(|| Unrevertable {
                id: id.as_str(),
                near_miss: records.iter().find(|r| r.name == name),
            })
        })
        .collect();
    found.sort_by(|a, b| a.id.cmp(b.id));
    found
}

fn warn_missing_down_files(
    records: &[MigrationRecord],
    applied: &HashSet<String>,
    target: &Version,
) {
    for missing in unrevertable(records, applied, target) {
        match missing.near_miss {
            Some(record) => log::warn!(
                "Applied migration {} will not be reverted: {} has the same name but version {}; \
                 rename it to {}.{}",
                missing.id,
                record.path.display(),
                record.version,
                missing.id,
                Direction::Down.file_suffix()
            ),
            None => log::warn!(
                "Applied migration {} has no down file and will not be reverted",
                missing.id
            ),
        }
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
