//! Migration versions.
//!
//! A [`Version`] is a UTC timestamp with second precision. Its canonical text
//! form is the fixed-width `YYYY-MM-DD-hh:mm:ss`, which is also the prefix of
//! every migration file name. Ordering and filtering always happen on the
//! parsed value, never on the string.

use crate::error::{CoreError, CoreResult};
use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// chrono format string for the canonical version text
pub const VERSION_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// Width of the canonical version text (`2024-01-31-23:59:59`)
pub const VERSION_WIDTH: usize = 19;

/// A migration version: a point in time with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(NaiveDateTime);

impl Version {
    /// Parse the canonical `YYYY-MM-DD-hh:mm:ss` text.
    ///
    /// Parsing is strict: only text that formats back to itself is accepted,
    /// so `Version::parse(s)?.to_string() == s` always holds.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidVersion {
            value: text.to_string(),
        };

        if text.len() != VERSION_WIDTH {
            return Err(invalid());
        }

        let parsed = NaiveDateTime::parse_from_str(text, VERSION_FORMAT).map_err(|_| invalid())?;
        let version = Self(parsed);
        if version.format() != text {
            return Err(invalid());
        }
        Ok(version)
    }

    /// Format as the canonical `YYYY-MM-DD-hh:mm:ss` text.
    pub fn format(&self) -> String {
        self.0.format(VERSION_FORMAT).to_string()
    }

    /// Current UTC wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Self(Utc::now().naive_utc().trunc_subsecs(0))
    }

    /// `self <= other`
    pub fn is_not_after(&self, other: &Version) -> bool {
        self <= other
    }

    /// `self >= other`
    pub fn is_not_before(&self, other: &Version) -> bool {
        self >= other
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(VERSION_FORMAT))
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Version {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
