use super::*;

#[test]
fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[test]
fn test_new_memory_special_case() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").unwrap();
    assert!(db.relation_exists("t").unwrap());
}

#[test]
fn test_from_path_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.duckdb");
    let db = DuckDbBackend::from_path(&path).unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").unwrap();
    assert!(path.exists());
}

#[test]
fn test_execute_batch_runs_every_statement() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE a (id INTEGER); CREATE TABLE b (id INTEGER);")
        .unwrap();

    assert!(db.relation_exists("a").unwrap());
    assert!(db.relation_exists("b").unwrap());
}

#[test]
fn test_execute_reports_failure() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("DROP TABLE missing_table").unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[test]
fn test_relation_exists_with_schema() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE SCHEMA ops; CREATE TABLE ops.ledger (id INTEGER);")
        .unwrap();
    assert!(db.relation_exists("ops.ledger").unwrap());
    assert!(!db.relation_exists("ledger").unwrap());
}

#[test]
fn test_query_rows_renders_text_and_nulls() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t (name VARCHAR, n INTEGER);
         INSERT INTO t VALUES ('a', 1), (NULL, 2);",
    )
    .unwrap();

    let rows = db.query_rows("SELECT name, n FROM t ORDER BY n").unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Some("a".to_string()), Some("1".to_string())],
            vec![None, Some("2".to_string())],
        ]
    );
}

#[test]
fn test_rollback_discards_changes() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").unwrap();
    db.rollback().unwrap();
    assert!(!db.relation_exists("t").unwrap());
}

#[test]
fn test_commit_keeps_changes() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").unwrap();
    db.commit().unwrap();
    assert!(db.relation_exists("t").unwrap());
}

#[test]
fn test_commit_without_transaction_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.commit().unwrap_err();
    assert!(matches!(err, DbError::TransactionError { .. }));
}

#[test]
fn test_execute_with_binds_parameters() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (a VARCHAR, b VARCHAR)").unwrap();

    let inserted = db
        .execute_with("INSERT INTO t VALUES (?, ?)", &["it's", "x'); DROP TABLE t; --"])
        .unwrap();
    assert_eq!(inserted, 1);

    let rows = db.query_rows("SELECT a, b FROM t").unwrap();
    assert_eq!(
        rows,
        vec![vec![
            Some("it's".to_string()),
            Some("x'); DROP TABLE t; --".to_string()),
        ]]
    );
}
