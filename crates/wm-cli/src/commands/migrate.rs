//! Migrate command implementation

use anyhow::{Context, Result};
use wm_core::Direction;
use wm_migrate::{Migrator, Plan};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_project, migrator_settings, open_database};

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let (direction, target) =
        Migrator::parse_tokens(&args.direction, args.target_version.as_deref())?;

    let project = load_project(global)?;
    let settings = migrator_settings(&project, global)?;
    let db = open_database(&project, global)?;
    let migrator = Migrator::new(db.as_ref(), settings);

    let plan = migrator
        .plan(direction, target)
        .context("Failed to plan migrations")?;

    if args.dry_run {
        print_plan(&plan);
        return Ok(());
    }

    let report = migrator
        .run_plan(&plan)
        .context("Migration run failed")?;

    if report.applied.is_empty() {
        println!("Nothing to migrate {direction}");
    } else {
        println!(
            "{} {} migration{} ({} statement{}) in {:.2}s",
            match direction {
                Direction::Up => "Applied",
                Direction::Down => "Reverted",
            },
            report.applied.len(),
            if report.applied.len() == 1 { "" } else { "s" },
            report.statements,
            if report.statements == 1 { "" } else { "s" },
            report.elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn print_plan(plan: &Plan) {
    if plan.is_empty() {
        println!(
            "Dry run - no {} migrations up to target {}",
            plan.direction, plan.target
        );
        return;
    }

    println!(
        "Dry run - would run {} {} migration{} (target {}):",
        plan.len(),
        plan.direction,
        if plan.len() == 1 { "" } else { "s" },
        plan.target
    );
    for (i, step) in plan.steps.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, step.path.display());
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
