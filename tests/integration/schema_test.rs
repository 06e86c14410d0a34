//! Integration tests for schema introspection.

use super::fixture;
use pretty_assertions::assert_eq;
use soccer_sql::db::DatasetClient;
use soccer_sql::output::render_schema;

#[tokio::test]
async fn test_introspect_lists_dataset_tables() {
    let dataset = fixture::empty().await;
    let client = fixture::open(&dataset).await;

    let schema = client.introspect_schema().await.unwrap();
    client.close().await.unwrap();

    let mut names = schema.table_names();
    names.sort();
    assert_eq!(
        names,
        vec!["Country", "League", "Match", "Player", "Player_Attributes", "Team"]
    );
}

#[tokio::test]
async fn test_introspect_columns_and_primary_keys() {
    let dataset = fixture::empty().await;
    let client = fixture::open(&dataset).await;
    let schema = client.introspect_schema().await.unwrap();
    client.close().await.unwrap();

    let player = schema.table("Player").unwrap();
    assert_eq!(player.primary_key, vec!["id".to_string()]);
    assert_eq!(player.column("height").unwrap().data_type, "INTEGER");
    assert!(player.column("height").unwrap().is_nullable);
    assert_eq!(player.column("player_name").unwrap().data_type, "TEXT");
}

#[tokio::test]
async fn test_introspect_foreign_keys() {
    let dataset = fixture::empty().await;
    let client = fixture::open(&dataset).await;
    let schema = client.introspect_schema().await.unwrap();
    client.close().await.unwrap();

    let league_fks = schema.foreign_keys_from("League");
    assert_eq!(league_fks.len(), 1);
    assert_eq!(league_fks[0].to_table, "Country");
    assert_eq!(league_fks[0].from_columns, vec!["country_id".to_string()]);
    assert_eq!(league_fks[0].to_columns, vec!["id".to_string()]);

    let mut match_targets: Vec<&str> = schema
        .foreign_keys_from("Match")
        .iter()
        .map(|fk| fk.to_table.as_str())
        .collect();
    match_targets.sort();
    assert_eq!(match_targets, vec!["Country", "League", "Team", "Team"]);
}

#[tokio::test]
async fn test_render_schema_of_fixture() {
    let dataset = fixture::empty().await;
    let client = fixture::open(&dataset).await;
    let schema = client.introspect_schema().await.unwrap();
    client.close().await.unwrap();

    let text = render_schema(&schema);
    assert!(text.contains("Player_Attributes"));
    assert!(text.contains("FK -> Country.id"));
}
