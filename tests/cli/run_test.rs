//! Tests for exit codes and output of the soccer-sql binary.

use super::common::run_binary;
use crate::integration::fixture;
use tempfile::tempdir;

#[test]
fn test_list_does_not_need_a_dataset() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.sqlite");

    let (code, stdout, _) = run_binary(dir.path(), &[missing.to_str().unwrap(), "--list"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("MULTI-TABLE JOIN"));
    assert!(stdout.contains("Unique seasons"));
    assert!(!missing.exists());
}

#[test]
fn test_missing_dataset_exits_with_one() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.sqlite");

    let (code, stdout, stderr) = run_binary(dir.path(), &[missing.to_str().unwrap()]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr.matches("missing.sqlite").count(), 1, "{stderr}");
    assert!(!missing.exists());
}

#[test]
fn test_unknown_query_number_exits_with_one() {
    let dir = tempdir().unwrap();

    let (code, _, stderr) = run_binary(dir.path(), &["--only", "21"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("21"));
}

#[tokio::test]
async fn test_full_run_exits_with_zero() {
    let dataset = fixture::standard().await;
    let dir = tempdir().unwrap();

    let (code, stdout, _) = run_binary(dir.path(), &[dataset.path.to_str().unwrap()]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Query 1 [SELECT]"));
    assert!(stdout.contains("Query 20 [CASE]"));
    assert!(stdout.contains("20 of 20 queries succeeded, 0 failed"));
}

#[tokio::test]
async fn test_failed_query_exits_with_two() {
    let statements: Vec<&str> = fixture::SCHEMA
        .iter()
        .copied()
        .filter(|s| !s.contains("Player_Attributes"))
        .collect();
    let dataset = fixture::build_raw(&statements).await;
    let dir = tempdir().unwrap();

    let (code, stdout, _) = run_binary(dir.path(), &[dataset.path.to_str().unwrap()]);

    assert_eq!(code, 2);
    assert!(stdout.contains("19 of 20 queries succeeded, 1 failed"));
    assert!(stdout.contains("Player_Attributes"));
}

#[tokio::test]
async fn test_json_output_from_config_file() {
    let dataset = fixture::standard().await;
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "[dataset]\npath = {:?}\n\n[output]\nformat = \"json\"\n",
            dataset.path.to_str().unwrap()
        ),
    )
    .unwrap();

    let (code, stdout, _) = run_binary(dir.path(), &["--only", "8"]);

    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["concept"], "DISTINCT");
    assert_eq!(items[0]["row_count"], 4);
}

#[tokio::test]
async fn test_tables_flag_prints_schema() {
    let dataset = fixture::empty().await;
    let dir = tempdir().unwrap();

    let (code, stdout, _) = run_binary(
        dir.path(),
        &[dataset.path.to_str().unwrap(), "--tables", "--only", "1"],
    );

    assert_eq!(code, 0);
    assert!(stdout.contains("Player_Attributes"));
    assert!(stdout.contains("Query 1 [SELECT]"));
}
