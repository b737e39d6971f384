//! Migration file discovery.
//!
//! A [`MigrationStore`] walks a migrations directory (recursively) and reads
//! every file whose name ends with the direction's suffix. Files that do not
//! match are ignored. A matching file with a malformed version aborts the
//! whole discovery so a partially-read set is never planned.

use crate::error::{MigrateError, MigrateResult};
use crate::record::MigrationRecord;
use std::path::{Path, PathBuf};
use wm_core::{Direction, MigrationFileName};

/// Reads migration files from a directory tree.
#[derive(Debug, Clone)]
pub struct MigrationStore {
    root: PathBuf,
}

impl MigrationStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every `direction` migration under the root.
    ///
    /// Records come back in traversal order; ordering is the planner's job.
    pub fn discover(&self, direction: Direction) -> MigrateResult<Vec<MigrationRecord>> {
        let mut records = Vec::new();
        discover_recursive(&self.root, direction, &mut records)?;
        log::debug!(
            "Discovered {} {} migration(s) under {}",
            records.len(),
            direction,
            self.root.display()
        );
        Ok(records)
    }
}

fn discovery_error(path: &Path) -> impl FnOnce(std::io::Error) -> MigrateError + '_ {
    move |source| MigrateError::Discovery {
        path: path.display().to_string(),
        source,
    }
}

/// Walk `dir`, pushing matching files onto `records`.
///
/// Symlinked directories are not followed.
fn discover_recursive(
    dir: &Path,
    direction: Direction,
    records: &mut Vec<MigrationRecord>,
) -> MigrateResult<()> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(discovery_error(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(discovery_error(dir))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(discovery_error(&path))?;

        if file_type.is_dir() {
            discover_recursive(&path, direction, records)?;
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.ends_with(direction.file_suffix()) {
            continue;
        }

        let parsed = MigrationFileName::parse(&file_name, direction).map_err(|source| {
            MigrateError::InvalidFileName {
                path: path.display().to_string(),
                source,
            }
        })?;

        let script = std::fs::read_to_string(&path).map_err(discovery_error(&path))?;

        records.push(MigrationRecord {
            version: parsed.version,
            name: parsed.name,
            direction,
            path,
            script,
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
