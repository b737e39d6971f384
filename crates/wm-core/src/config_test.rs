use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.database.db_type, DbType::DuckDb);
    assert!(config.ledger.enabled);
    assert_eq!(config.ledger.table, "schema_migrations");
    assert_eq!(config.execution.transaction, TransactionMode::Batch);
}

#[test]
fn test_default_script_modes_follow_direction() {
    let execution = ExecutionConfig::default();
    assert_eq!(execution.script_mode(Direction::Up), ScriptMode::Batch);
    assert_eq!(execution.script_mode(Direction::Down), ScriptMode::Statements);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
migrations_dir: db/migrations
database:
  type: duckdb
  path: ./app.duckdb
ledger:
  enabled: false
  table: ops.applied
execution:
  transaction: per_migration
  up: statements
  down: batch
  dialect: generic
targets:
  prod:
    database:
      path: ./prod.duckdb
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.migrations_dir, "db/migrations");
    assert_eq!(config.database.path, "./app.duckdb");
    assert!(!config.ledger.enabled);
    assert_eq!(config.ledger.table, "ops.applied");
    assert_eq!(config.execution.transaction, TransactionMode::PerMigration);
    assert_eq!(config.execution.up, ScriptMode::Statements);
    assert_eq!(config.execution.down, ScriptMode::Batch);
    assert_eq!(config.execution.dialect, Dialect::Generic);
    assert_eq!(config.available_targets(), vec!["prod"]);
}

#[test]
fn test_transaction_none_parses() {
    let config: Config = serde_yaml::from_str("execution:\n  transaction: none").unwrap();
    assert_eq!(config.execution.transaction, TransactionMode::None);
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("migrations: nope");
    assert!(result.is_err());
}

#[test]
fn test_target_overrides_database_and_dir() {
    let yaml = r#"
database:
  path: dev.duckdb
targets:
  prod:
    database:
      path: prod.duckdb
    migrations_dir: prod_migrations
  staging: {}
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let root = std::path::PathBuf::from("/srv/app");

    assert_eq!(config.get_database_config(None).unwrap().path, "dev.duckdb");
    assert_eq!(
        config.get_database_config(Some("prod")).unwrap().path,
        "prod.duckdb"
    );
    assert_eq!(
        config.get_database_config(Some("staging")).unwrap().path,
        "dev.duckdb"
    );
    assert_eq!(
        config.migrations_dir_absolute(&root, Some("prod")).unwrap(),
        root.join("prod_migrations")
    );
    assert_eq!(
        config.migrations_dir_absolute(&root, None).unwrap(),
        root.join("migrations")
    );
}

#[test]
fn test_unknown_target_lists_available() {
    let config: Config = serde_yaml::from_str("targets:\n  prod: {}\n  dev: {}").unwrap();
    let err = config.get_database_config(Some("qa")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Target 'qa' not found"));
    assert!(msg.contains("dev, prod"));
}

#[test]
fn test_load_from_dir() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("waymark.yml"),
        "migrations_dir: sql\ndatabase:\n  path: local.duckdb\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "sql");
    assert_eq!(config.database.path, "local.duckdb");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("waymark.yaml"), "migrations_dir: other\n").unwrap();
    assert_eq!(
        Config::load_from_dir(dir.path()).unwrap().migrations_dir,
        "other"
    );
}

#[test]
fn test_load_from_dir_missing_config() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));

    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "migrations");
}

#[test]
fn test_load_rejects_empty_ledger_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("waymark.yml");
    fs::write(&path, "ledger:\n  table: \"\"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_reports_parse_errors_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("waymark.yml");
    fs::write(&path, "execution:\n  transaction: sometimes\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    match err {
        CoreError::ConfigParseError { message } => assert!(message.contains("waymark.yml")),
        other => panic!("unexpected error: {other:?}"),
    }
}
