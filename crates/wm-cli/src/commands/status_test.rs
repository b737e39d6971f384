use super::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        target: None,
        database: Some("app.duckdb".to_string()),
        migrations_dir: None,
    }
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("migrations");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("2023-01-01-00:00:00_users.up.sql"), "SELECT 1;").unwrap();
    temp
}

#[test]
fn test_status_table_and_json() {
    let temp = project();
    let table = StatusArgs {
        output: StatusOutput::Table,
    };
    let json = StatusArgs {
        output: StatusOutput::Json,
    };
    execute(&table, &global(temp.path())).unwrap();
    execute(&json, &global(temp.path())).unwrap();
}

#[test]
fn test_status_fails_when_ledger_disabled() {
    let temp = project();
    fs::write(temp.path().join("waymark.yml"), "ledger:\n  enabled: false\n").unwrap();
    let args = StatusArgs {
        output: StatusOutput::Table,
    };
    let err = execute(&args, &global(temp.path())).unwrap_err();
    assert!(format!("{err:#}").contains("M008"));
}

#[test]
fn test_print_table_handles_empty() {
    print_table(&[]);
}
