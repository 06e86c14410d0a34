//! Integration tests for whole catalog runs.

use super::fixture;
use soccer_sql::db::DatasetClient;
use soccer_sql::error::SoccerSqlError;
use soccer_sql::output::{OutputFormat, ReportRenderer};
use soccer_sql::query::{catalog, QueryRunner};

#[tokio::test]
async fn test_full_run_succeeds_in_catalog_order() {
    let dataset = fixture::standard().await;
    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[]).unwrap();

    let report = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    assert!(report.is_success(), "failures: {:?}", report.entries);
    assert_eq!(report.succeeded(), 20);
    let numbers: Vec<u8> = report.entries.iter().map(|e| e.entry.number).collect();
    assert_eq!(numbers, (1..=20).collect::<Vec<u8>>());
}

#[tokio::test]
async fn test_empty_dataset_runs_without_errors() {
    let dataset = fixture::empty().await;
    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[]).unwrap();

    let report = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    assert!(report.is_success());
    for entry_report in &report.entries {
        let result = entry_report.result().unwrap();
        // Whole-table aggregates yield one all-NULL row; everything else is empty.
        assert!(
            result.is_empty() || result.is_all_null(),
            "{} returned data from empty tables",
            entry_report.entry.label()
        );
        assert!(!result.columns.is_empty());
    }
    for number in [14, 15, 17] {
        assert_eq!(report.entry(number).unwrap().result().unwrap().row_count, 1);
    }
}

#[tokio::test]
async fn test_runs_are_deterministic() {
    let dataset = fixture::standard().await;
    let entries = catalog::select(&[]).unwrap();

    let client = fixture::open(&dataset).await;
    let first = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    let client = fixture::open(&dataset).await;
    let second = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    for (a, b) in first.entries.iter().zip(&second.entries) {
        let (a, b) = (a.result().unwrap(), b.result().unwrap());
        assert!(a.same_data(b));
    }
}

#[tokio::test]
async fn test_missing_table_fails_only_its_entry() {
    let statements: Vec<&str> = fixture::SCHEMA
        .iter()
        .chain(fixture::SEED)
        .copied()
        .filter(|s| !s.contains("Player_Attributes"))
        .collect();
    let dataset = fixture::build_raw(&statements).await;
    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[]).unwrap();

    let report = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    assert_eq!(report.entries.len(), 20);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_success());

    let failed = report.entry(20).unwrap();
    let err = failed.outcome.as_ref().unwrap_err();
    assert!(matches!(err, SoccerSqlError::Query(_)));
    assert!(err.to_string().contains("query 20 [CASE]"));
    assert!(err.to_string().contains("Player_Attributes"));
}

#[tokio::test]
async fn test_fail_fast_stops_at_first_failure() {
    let statements: Vec<&str> = fixture::SCHEMA
        .iter()
        .copied()
        .filter(|s| !s.contains("CREATE TABLE Player ("))
        .collect();
    let dataset = fixture::build_raw(&statements).await;
    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[]).unwrap();

    let report = QueryRunner::new(&client).run(&entries, true).await;
    client.close().await.unwrap();

    // Query 6 is the first to read Player.
    assert_eq!(report.entries.len(), 6);
    assert!(!report.entries[5].is_success());
    assert_eq!(report.skipped, 14);
}

#[tokio::test]
async fn test_run_leaves_dataset_untouched() {
    let dataset = fixture::standard().await;
    let before = std::fs::read(&dataset.path).unwrap();
    let modified_before = std::fs::metadata(&dataset.path).unwrap().modified().unwrap();

    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[]).unwrap();
    QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    assert_eq!(std::fs::read(&dataset.path).unwrap(), before);
    assert_eq!(
        std::fs::metadata(&dataset.path).unwrap().modified().unwrap(),
        modified_before
    );
}

#[tokio::test]
async fn test_selected_subset_renders_as_json() {
    let dataset = fixture::standard().await;
    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[9, 2]).unwrap();

    let report = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    let json = ReportRenderer::new(OutputFormat::Json, 1).render(&report);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let items = parsed.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["number"], 2);
    assert_eq!(items[0]["status"], "ok");
    assert_eq!(items[0]["rows"][0]["name"], "Spain LIGA BBVA");
    assert_eq!(items[1]["concept"], "NULL");
    assert_eq!(items[1]["rows"][0]["player_name"], "Unknown Height");
}

#[tokio::test]
async fn test_text_report_lists_every_entry() {
    let dataset = fixture::standard().await;
    let client = fixture::open(&dataset).await;
    let entries = catalog::select(&[]).unwrap();

    let report = QueryRunner::new(&client).run(&entries, false).await;
    client.close().await.unwrap();

    let text = ReportRenderer::new(OutputFormat::Text, 3).render(&report);
    for entry in catalog::catalog() {
        assert!(text.contains(&format!("Query {} [{}]", entry.number, entry.concept)));
    }
    assert!(text.contains("20 of 20 queries succeeded, 0 failed"));
}
