//! Create command implementation

use anyhow::{Context, Result};
use wm_core::MigrationName;
use wm_migrate::scaffold_now;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::commands::common::{load_project, migrator_settings};

/// Execute the create command
pub(crate) fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let name = MigrationName::parse(args.name.as_str())?;
    let project = load_project(global)?;
    let settings = migrator_settings(&project, global)?;

    let pair = scaffold_now(&settings.migrations_dir, &name)
        .context("Failed to create migration")?;

    println!("Created migration {}_{}", pair.version, name);
    println!("  {}", pair.up.display());
    println!("  {}", pair.down.display());
    Ok(())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
