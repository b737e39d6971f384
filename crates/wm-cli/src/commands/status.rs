//! Status command implementation

use anyhow::{Context, Result};
use wm_migrate::{MigrationStatus, Migrator};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_project, migrator_settings, open_database};

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let settings = migrator_settings(&project, global)?;
    let db = open_database(&project, global)?;
    let migrator = Migrator::new(db.as_ref(), settings);

    let statuses = migrator
        .status()
        .context("Failed to read migration status")?;

    match args.output {
        StatusOutput::Table => print_table(&statuses),
        StatusOutput::Json => print_json(&statuses)?,
    }
    Ok(())
}

fn print_table(statuses: &[MigrationStatus]) {
    if statuses.is_empty() {
        println!("No migrations found");
        return;
    }

    let id_width = statuses.iter().map(|s| s.id.len()).max().unwrap_or(2).max(2);
    let state_width = 8;

    println!(
        "{:<id_width$}  {:<state_width$}  APPLIED_AT",
        "ID", "STATE",
    );
    println!(
        "{:-<id_width$}  {:-<state_width$}  {}",
        "",
        "",
        "-".repeat(26),
    );
    for status in statuses {
        println!(
            "{:<id_width$}  {:<state_width$}  {}",
            status.id,
            status.state.label(),
            status.state.applied_at().unwrap_or("-"),
        );
    }

    let pending = statuses
        .iter()
        .filter(|s| s.state.label() == "pending")
        .count();
    println!();
    println!(
        "{} migration{}, {} pending",
        statuses.len(),
        if statuses.len() == 1 { "" } else { "s" },
        pending
    );
}

fn print_json(statuses: &[MigrationStatus]) -> Result<()> {
    let json = serde_json::to_string_pretty(statuses).context("Failed to serialize to JSON")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
