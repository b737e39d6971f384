//! A discovered migration script.

use std::path::PathBuf;
use wm_core::{compute_checksum, migration_id, Direction, Version};

/// One migration file for one direction, with its full script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    /// Version parsed from the file name prefix
    pub version: Version,

    /// Descriptive name between the version and the direction suffix
    pub name: String,

    /// Direction this script runs in
    pub direction: Direction,

    /// Path the script was read from
    pub path: PathBuf,

    /// Full script text
    pub script: String,
}

impl MigrationRecord {
    /// Identity shared by the up and down files of a pair: `<version>_<name>`.
    pub fn id(&self) -> String {
        migration_id(&self.version, &self.name)
    }

    /// File name portion of the path, for messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// SHA-256 of the script text.
    pub fn checksum(&self) -> String {
        compute_checksum(&self.script)
    }

    /// True when the script holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.script.trim().is_empty()
    }
}
