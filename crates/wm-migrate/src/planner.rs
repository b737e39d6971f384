//! Selecting and ordering the migrations a run will apply.

use crate::error::{MigrateError, MigrateResult};
use crate::record::MigrationRecord;
use std::collections::{HashMap, HashSet};
use wm_core::{Direction, Version};

/// Keep the records on the `direction` side of `target`.
///
/// Up keeps versions at or before the target; down keeps versions at or
/// after it. Both bounds are inclusive. Input order is preserved.
pub fn select(
    records: Vec<MigrationRecord>,
    direction: Direction,
    target: &Version,
) -> Vec<MigrationRecord> {
    records
        .into_iter()
        .filter(|record| match direction {
            Direction::Up => record.version.is_not_after(target),
            Direction::Down => record.version.is_not_before(target),
        })
        .collect()
}

/// An ordered list of migrations to run in one direction.
#[derive(Debug, Clone)]
pub struct Plan {
    pub direction: Direction,
    pub target: Version,
    pub steps: Vec<MigrationRecord>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `<version>_<name>` of every step, in run order.
    pub fn ids(&self) -> Vec<String> {
        self.steps.iter().map(MigrationRecord::id).collect()
    }
}

/// Builds a [`Plan`] from discovered records.
#[derive(Debug, Clone, Copy)]
pub struct Planner {
    direction: Direction,
    target: Version,
}

impl Planner {
    pub fn new(direction: Direction, target: Version) -> Self {
        Self { direction, target }
    }

    /// Filter, de-duplicate and order `records`.
    ///
    /// With `applied` set (the ledger's ids), up only keeps migrations not yet
    /// applied and down only keeps migrations that are. Steps run in ascending
    /// version order for up and descending for down, ties broken by name.
    pub fn plan(
        &self,
        records: Vec<MigrationRecord>,
        applied: Option<&HashSet<String>>,
    ) -> MigrateResult<Plan> {
        check_duplicates(&records)?;

        let mut steps = select(records, self.direction, &self.target);

        if let Some(applied) = applied {
            let before = steps.len();
            steps.retain(|record| {
                let is_applied = applied.contains(&record.id());
                match self.direction {
                    Direction::Up => !is_applied,
                    Direction::Down => is_applied,
                }
            });
            log::debug!(
                "Ledger filtered {} of {} {} migration(s)",
                before - steps.len(),
                before,
                self.direction
            );
        }

        steps.sort_by(|a, b| {
            a.version
                .cmp(&b.version)
                .then_with(|| a.name.cmp(&b.name))
        });
        if self.direction == Direction::Down {
            steps.reverse();
        }

        Ok(Plan {
            direction: self.direction,
            target: self.target,
            steps,
        })
    }
}

fn check_duplicates(records: &[MigrationRecord]) -> MigrateResult<()> {
    let mut seen: HashMap<String, &MigrationRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(existing) = seen.insert(record.id(), record) {
            return Err(MigrateError::DuplicateMigration {
                id: record.id(),
                path1: existing.path.display().to_string(),
                path2: record.path.display().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
