use super::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wm_core::CoreError;

fn global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        target: None,
        database: None,
        migrations_dir: None,
    }
}

#[test]
fn test_create_writes_pair_into_migrations_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("migrations");
    fs::create_dir(&dir).unwrap();

    let args = CreateArgs {
        name: "add_users".to_string(),
    };
    execute(&args, &global(temp.path())).unwrap();

    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("_add_users.down.sql"));
    assert!(names[1].ends_with("_add_users.up.sql"));
}

#[test]
fn test_create_rejects_bad_name() {
    let temp = TempDir::new().unwrap();
    let args = CreateArgs {
        name: "add users".to_string(),
    };
    let err = execute(&args, &global(temp.path())).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::InvalidName { .. })
    ));
}

#[test]
fn test_create_fails_without_migrations_dir() {
    let temp = TempDir::new().unwrap();
    let args = CreateArgs {
        name: "add_users".to_string(),
    };
    assert!(execute(&args, &global(temp.path())).is_err());
}
