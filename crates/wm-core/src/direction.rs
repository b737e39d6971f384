//! Migration direction (`up` advances the schema, `down` reverts it).

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction a migration moves the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Forward: schema-advancing scripts (`*.up.sql`)
    Up,
    /// Backward: schema-reverting scripts (`*.down.sql`)
    Down,
}

impl Direction {
    /// Parse a direction token. Only `up` and `down` are accepted.
    pub fn parse(token: &str) -> CoreResult<Self> {
        match token {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(CoreError::InvalidDirection {
                value: other.to_string(),
            }),
        }
    }

    /// The direction token as it appears in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// File-name suffix matched during discovery (`up.sql` / `down.sql`).
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Direction::Up => "up.sql",
            Direction::Down => "down.sql",
        }
    }

    /// Present-progressive verb for log and CLI output.
    pub fn verb(&self) -> &'static str {
        match self {
            Direction::Up => "Applying",
            Direction::Down => "Reverting",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "direction_test.rs"]
mod tests;
