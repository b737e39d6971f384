//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wm_core::config::{Config, DatabaseConfig};
use wm_db::Database;
use wm_migrate::MigratorSettings;

use crate::cli::GlobalArgs;

/// A project directory and its resolved configuration.
#[derive(Debug)]
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

/// Load the project config from `--config`, or from the project directory
/// (falling back to defaults when it has no config file).
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir_or_default(&root),
    }
    .context("Failed to load project")?;
    Ok(Project { root, config })
}

/// Database connection settings after applying `--target` and `--database`.
///
/// Relative file paths are resolved against the project root.
pub(crate) fn database_config(project: &Project, global: &GlobalArgs) -> Result<DatabaseConfig> {
    let mut db_config = project
        .config
        .get_database_config(global.target.as_deref())
        .context("Failed to resolve database target")?;
    if let Some(path) = &global.database {
        db_config.path = path.clone();
    }
    if db_config.path != ":memory:" && Path::new(&db_config.path).is_relative() {
        db_config.path = project.root.join(&db_config.path).display().to_string();
    }
    Ok(db_config)
}

/// Open the project's database.
pub(crate) fn open_database(project: &Project, global: &GlobalArgs) -> Result<Box<dyn Database>> {
    let db_config = database_config(project, global)?;
    wm_db::connect(&db_config)
        .with_context(|| format!("Failed to open database at {}", db_config.path))
}

/// Engine settings after applying `--target` and `--migrations-dir`.
pub(crate) fn migrator_settings(project: &Project, global: &GlobalArgs) -> Result<MigratorSettings> {
    let mut settings =
        MigratorSettings::from_config(&project.config, &project.root, global.target.as_deref())
            .context("Failed to resolve migrations directory")?;
    if let Some(dir) = &global.migrations_dir {
        settings.migrations_dir = project.root.join(dir);
    }
    Ok(settings)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
