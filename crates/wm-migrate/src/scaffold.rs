//! Creating an empty up/down migration pair.

use crate::error::{MigrateError, MigrateResult};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use wm_core::{Direction, MigrationFileName, MigrationName, Version};

/// The files written by [`scaffold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedPair {
    pub version: Version,
    pub up: PathBuf,
    pub down: PathBuf,
}

/// Create `<version>_<name>.up.sql` and `<version>_<name>.down.sql` in `dir`.
///
/// Both files are empty and share one version. Existing files are never
/// overwritten; if the down file cannot be created the up file is removed
/// again so no half pair is left behind. `dir` must already exist.
pub fn scaffold(dir: &Path, name: &MigrationName, version: Version) -> MigrateResult<ScaffoldedPair> {
    let up = dir.join(MigrationFileName::new(version, name, Direction::Up).to_string());
    let down = dir.join(MigrationFileName::new(version, name, Direction::Down).to_string());

    create_empty(&up)?;
    if let Err(e) = create_empty(&down) {
        if let Err(cleanup) = std::fs::remove_file(&up) {
            log::warn!("Failed to remove {}: {cleanup}", up.display());
        }
        return Err(e);
    }

    log::info!("Created {}", up.display());
    log::info!("Created {}", down.display());
    Ok(ScaffoldedPair { version, up, down })
}

/// [`scaffold`] stamped with the current UTC time.
pub fn scaffold_now(dir: &Path, name: &MigrationName) -> MigrateResult<ScaffoldedPair> {
    scaffold(dir, name, Version::now())
}

fn create_empty(path: &Path) -> MigrateResult<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| MigrateError::Scaffold {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
