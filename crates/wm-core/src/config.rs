//! Configuration types and parsing for waymark.yml

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file names searched for in a project directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["waymark.yml", "waymark.yaml"];

/// Main project configuration from waymark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory (relative to the project root) holding migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Applied-migration ledger settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// How scripts are sent to the database
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Named target configurations (e.g., dev, staging, prod)
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            ledger: LedgerConfig::default(),
            execution: ExecutionConfig::default(),
            targets: HashMap::new(),
        }
    }
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Migrations directory override
    #[serde(default)]
    pub migrations_dir: Option<String>,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

/// Ledger (`schema_migrations`) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Track applied migrations in a table. When disabled, selection is
    /// purely by version against the target.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Ledger table name, optionally schema-qualified
    #[serde(default = "default_ledger_table")]
    pub table: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            table: default_ledger_table(),
        }
    }
}

/// Transaction scope used while applying a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionMode {
    /// One transaction around the whole plan
    #[default]
    Batch,
    /// One transaction per migration file
    PerMigration,
    /// No transaction; statements commit as they run
    None,
}

/// How a single script is sent to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    /// The whole script in one multi-statement call
    Batch,
    /// One call per `;`-separated statement
    Statements,
}

/// SQL dialect used to tokenize scripts when splitting statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL: E'' escape strings and dollar-quoted bodies
    #[default]
    DuckDb,
    /// Generic ANSI-ish dialect
    Generic,
}

/// Execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Transaction scope
    #[serde(default)]
    pub transaction: TransactionMode,

    /// Script mode for `up` migrations
    #[serde(default = "default_up_mode")]
    pub up: ScriptMode,

    /// Script mode for `down` migrations
    #[serde(default = "default_down_mode")]
    pub down: ScriptMode,

    /// Dialect for statement splitting
    #[serde(default)]
    pub dialect: Dialect,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            transaction: TransactionMode::default(),
            up: default_up_mode(),
            down: default_down_mode(),
            dialect: Dialect::default(),
        }
    }
}

impl ExecutionConfig {
    /// Script mode configured for `direction`
    pub fn script_mode(&self, direction: Direction) -> ScriptMode {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

const DEFAULT_DB_PATH: &str = ":memory:";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_ledger_table() -> String {
    "schema_migrations".to_string()
}

fn default_up_mode() -> ScriptMode {
    ScriptMode::Batch
}

fn default_down_mode() -> ScriptMode {
    ScriptMode::Statements
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {e}", path.display()),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for waymark.yml or waymark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Like [`load_from_dir`](Self::load_from_dir), but a project without a
    /// config file gets the defaults.
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if self.ledger.table.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "ledger.table cannot be empty".to_string(),
            });
        }

        for (name, target) in &self.targets {
            if target
                .migrations_dir
                .as_deref()
                .is_some_and(|dir| dir.trim().is_empty())
            {
                return Err(CoreError::ConfigInvalid {
                    message: format!("targets.{name}.migrations_dir cannot be empty"),
                });
            }
        }

        Ok(())
    }

    /// Get the list of available target names
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn get_target(&self, name: &str) -> CoreResult<&TargetConfig> {
        self.targets
            .get(name)
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: format!(
                    "Target '{}' not found. Available targets: {}",
                    name,
                    self.available_targets().join(", ")
                ),
            })
    }

    /// Get database configuration, optionally applying target overrides
    pub fn get_database_config(&self, target: Option<&str>) -> CoreResult<DatabaseConfig> {
        match target {
            Some(name) => Ok(self
                .get_target(name)?
                .database
                .clone()
                .unwrap_or_else(|| self.database.clone())),
            None => Ok(self.database.clone()),
        }
    }

    /// Get the migrations directory resolved against `root`, optionally
    /// applying target overrides
    pub fn migrations_dir_absolute(&self, root: &Path, target: Option<&str>) -> CoreResult<PathBuf> {
        let dir = match target {
            Some(name) => self
                .get_target(name)?
                .migrations_dir
                .as_deref()
                .unwrap_or(&self.migrations_dir),
            None => &self.migrations_dir,
        };
        Ok(root.join(dir))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
