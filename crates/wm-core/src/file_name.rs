//! Migration file naming: `<version>_<name>.<direction>.sql`.

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use crate::version::Version;
use std::fmt;

/// Separator between the version prefix and the descriptive name.
pub const VERSION_SEPARATOR: char = '_';

/// A parsed migration file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFileName {
    /// Version taken from the text before the first `_`
    pub version: Version,
    /// Descriptive name between the separator and `.<direction>.sql`
    pub name: String,
    /// Direction the file belongs to
    pub direction: Direction,
}

impl MigrationFileName {
    /// Build the file name for a freshly scaffolded migration.
    pub fn new(version: Version, name: &MigrationName, direction: Direction) -> Self {
        Self {
            version,
            name: name.to_string(),
            direction,
        }
    }

    /// Parse a file name that ends with `direction`'s suffix.
    ///
    /// The version is everything before the first `_`. The name is what
    /// remains once `.<direction>.sql` (or the bare `<direction>.sql`) has
    /// been stripped.
    pub fn parse(file_name: &str, direction: Direction) -> CoreResult<Self> {
        let suffix = direction.file_suffix();
        if !file_name.ends_with(suffix) {
            return Err(CoreError::InvalidFileName {
                file_name: file_name.to_string(),
                reason: format!("expected a name ending in '{suffix}'"),
            });
        }

        let version = version_from_file_name(file_name)?;

        let rest = match file_name.split_once(VERSION_SEPARATOR) {
            Some((_, rest)) => rest,
            None => "",
        };
        let dotted = format!(".{suffix}");
        let name = rest
            .strip_suffix(dotted.as_str())
            .or_else(|| rest.strip_suffix(suffix))
            .unwrap_or(rest);

        Ok(Self {
            version,
            name: name.to_string(),
            direction,
        })
    }

    /// Identity shared by the up and down files of a pair: `<version>_<name>`.
    pub fn id(&self) -> String {
        migration_id(&self.version, &self.name)
    }
}

impl fmt::Display for MigrationFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}.{}",
            self.version,
            VERSION_SEPARATOR,
            self.name,
            self.direction.file_suffix()
        )
    }
}

/// Extract the version from the text before the first `_` of a file name.
pub fn version_from_file_name(file_name: &str) -> CoreResult<Version> {
    let (prefix, _) =
        file_name
            .split_once(VERSION_SEPARATOR)
            .ok_or_else(|| CoreError::InvalidFileName {
                file_name: file_name.to_string(),
                reason: "missing '_' between version and name".to_string(),
            })?;

    Version::parse(prefix).map_err(|e| CoreError::InvalidFileName {
        file_name: file_name.to_string(),
        reason: e.to_string(),
    })
}

/// `<version>_<name>`
pub fn migration_id(version: &Version, name: &str) -> String {
    format!("{version}{VERSION_SEPARATOR}{name}")
}

#[cfg(test)]
#[path = "file_name_test.rs"]
mod tests;
