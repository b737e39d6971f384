use super::*;
use std::path::PathBuf;

fn v(text: &str) -> Version {
    Version::parse(text).unwrap()
}

fn record(version: &str, name: &str, direction: Direction) -> MigrationRecord {
    MigrationRecord {
        version: v(version),
        name: name.to_string(),
        direction,
        path: PathBuf::from(format!("{version}_{name}.{}", direction.file_suffix())),
        script: String::new(),
    }
}

fn three(direction: Direction) -> Vec<MigrationRecord> {
    vec![
        record("2024-01-01-00:00:00", "c", direction),
        record("2023-01-01-00:00:00", "a", direction),
        record("2023-06-01-00:00:00", "b", direction),
    ]
}

fn versions(records: &[MigrationRecord]) -> Vec<String> {
    records.iter().map(|r| r.version.to_string()).collect()
}

#[test]
fn test_select_up_keeps_versions_up_to_target() {
    let selected = select(
        three(Direction::Up),
        Direction::Up,
        &v("2023-06-01-00:00:00"),
    );
    let mut got = versions(&selected);
    got.sort();
    assert_eq!(got, vec!["2023-01-01-00:00:00", "2023-06-01-00:00:00"]);
}

#[test]
fn test_select_down_keeps_versions_from_target() {
    let selected = select(
        three(Direction::Down),
        Direction::Down,
        &v("2023-06-01-00:00:00"),
    );
    let mut got = versions(&selected);
    got.sort();
    assert_eq!(got, vec!["2023-06-01-00:00:00", "2024-01-01-00:00:00"]);
}

#[test]
fn test_select_boundary_is_inclusive_both_ways() {
    let target = v("2023-06-01-00:00:00");
    let up = select(
        vec![record("2023-06-01-00:00:00", "b", Direction::Up)],
        Direction::Up,
        &target,
    );
    let down = select(
        vec![record("2023-06-01-00:00:00", "b", Direction::Down)],
        Direction::Down,
        &target,
    );
    assert_eq!(up.len(), 1);
    assert_eq!(down.len(), 1);
}

#[test]
fn test_select_preserves_input_order() {
    let selected = select(
        three(Direction::Up),
        Direction::Up,
        &v("2030-01-01-00:00:00"),
    );
    assert_eq!(
        versions(&selected),
        vec![
            "2024-01-01-00:00:00",
            "2023-01-01-00:00:00",
            "2023-06-01-00:00:00"
        ]
    );
}

#[test]
fn test_plan_up_sorted_ascending() {
    let plan = Planner::new(Direction::Up, v("2030-01-01-00:00:00"))
        .plan(three(Direction::Up), None)
        .unwrap();
    assert_eq!(
        versions(&plan.steps),
        vec![
            "2023-01-01-00:00:00",
            "2023-06-01-00:00:00",
            "2024-01-01-00:00:00"
        ]
    );
    assert_eq!(plan.len(), 3);
}

#[test]
fn test_plan_down_sorted_descending() {
    let plan = Planner::new(Direction::Down, v("2000-01-01-00:00:00"))
        .plan(three(Direction::Down), None)
        .unwrap();
    assert_eq!(
        versions(&plan.steps),
        vec![
            "2024-01-01-00:00:00",
            "2023-06-01-00:00:00",
            "2023-01-01-00:00:00"
        ]
    );
}

#[test]
fn test_plan_ties_broken_by_name() {
    let records = vec![
        record("2023-01-01-00:00:00", "zeta", Direction::Up),
        record("2023-01-01-00:00:00", "alpha", Direction::Up),
    ];
    let plan = Planner::new(Direction::Up, v("2023-01-01-00:00:00"))
        .plan(records, None)
        .unwrap();
    assert_eq!(
        plan.ids(),
        vec!["2023-01-01-00:00:00_alpha", "2023-01-01-00:00:00_zeta"]
    );
}

#[test]
fn test_plan_up_skips_applied() {
    let applied: HashSet<String> = ["2023-01-01-00:00:00_a".to_string()].into();
    let plan = Planner::new(Direction::Up, v("2030-01-01-00:00:00"))
        .plan(three(Direction::Up), Some(&applied))
        .unwrap();
    assert_eq!(
        plan.ids(),
        vec!["2023-06-01-00:00:00_b", "2024-01-01-00:00:00_c"]
    );
}

#[test]
fn test_plan_down_only_reverts_applied() {
    let applied: HashSet<String> = ["2023-06-01-00:00:00_b".to_string()].into();
    let plan = Planner::new(Direction::Down, v("2000-01-01-00:00:00"))
        .plan(three(Direction::Down), Some(&applied))
        .unwrap();
    assert_eq!(plan.ids(), vec!["2023-06-01-00:00:00_b"]);
}

#[test]
fn test_plan_rejects_duplicate_ids() {
    let mut records = three(Direction::Up);
    let mut dup = record("2023-01-01-00:00:00", "a", Direction::Up);
    dup.path = PathBuf::from("nested/2023-01-01-00:00:00_a.up.sql");
    records.push(dup);

    let err = Planner::new(Direction::Up, v("2030-01-01-00:00:00"))
        .plan(records, None)
        .unwrap_err();
    assert!(matches!(err, MigrateError::DuplicateMigration { .. }));
}

#[test]
fn test_plan_empty_input() {
    let plan = Planner::new(Direction::Up, v("2030-01-01-00:00:00"))
        .plan(Vec::new(), None)
        .unwrap();
    assert!(plan.is_empty());
}
