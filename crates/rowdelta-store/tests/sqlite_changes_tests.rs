// Integration tests for change detection over SQLite
// Covers the movie scenario, requests, whole-database scope and file-backed databases

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_movies, mutate_movies, setup_movie_db};
use rowdelta_core::{ChangeType, Changes, ExErrorKind, RawValue, RequestSource};
use rowdelta_store::SqliteProvider;
use tempfile::TempDir;

#[test]
fn test_movie_scenario_over_sqlite() {
    // Given: The movie table monitored from a start point
    let conn = setup_movie_db();
    let mut changes = Changes::on_tables(SqliteProvider::new(&conn), ["movie"]);
    changes.mark_start().unwrap();

    // When: 5 is added, 1 retitled and 2 removed
    mutate_movies(&conn);
    changes.mark_end().unwrap();

    // Then: One change of each type, start rows first
    let order: Vec<(ChangeType, RawValue)> = changes
        .changes()
        .unwrap()
        .iter()
        .map(|c| (c.change_type(), c.pk_values()[0].raw().clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            (ChangeType::Modification, RawValue::Int(1)),
            (ChangeType::Deletion, RawValue::Int(2)),
            (ChangeType::Creation, RawValue::Int(5)),
        ]
    );

    // And: The modification names the retitled column
    let modification = changes.modifications().unwrap()[0];
    assert_eq!(modification.modified_column_names(), vec!["title"]);
    assert!(modification
        .row_at_end()
        .unwrap()
        .value_by_name("title")
        .unwrap()
        .is_equal_to("Test4")
        .unwrap());
}

#[test]
fn test_no_writes_means_no_changes() {
    let conn = setup_movie_db();
    let mut changes = Changes::on_tables(SqliteProvider::new(&conn), ["movie"]);
    changes.mark_start().unwrap();
    changes.mark_end().unwrap();

    assert_eq!(changes.count().unwrap(), 0);
}

#[test]
fn test_parameterized_request() {
    // Given: A request over movies from id 2 on, keyed by id
    let conn = setup_movie_db();
    let request = RequestSource::new("SELECT id, title FROM movie WHERE id >= ?1 ORDER BY id")
        .with_parameters(vec![RawValue::Int(2)])
        .with_primary_key(["id"])
        .unwrap();
    let mut changes = Changes::on_request(SqliteProvider::new(&conn), request);
    changes.mark_start().unwrap();
    assert_eq!(changes.snapshots_at_start().unwrap()[0].len(), 1);

    // When: The reference mutation runs
    mutate_movies(&conn);
    changes.mark_end().unwrap();

    // Then: Only rows inside the request are reported, and 1 is outside it
    assert_eq!(changes.deletions().unwrap().len(), 1);
    assert_eq!(changes.creations().unwrap().len(), 1);
    assert!(changes.modifications().unwrap().is_empty());
}

#[test]
fn test_database_scope_skips_internal_tables() {
    // Given: A database whose AUTOINCREMENT table creates sqlite_sequence
    let conn = setup_movie_db();
    conn.execute_batch(
        "CREATE TABLE actor (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
         INSERT INTO actor (name) VALUES ('Ann');",
    )
    .unwrap();

    let mut changes = Changes::on_database(SqliteProvider::new(&conn));
    changes.mark_start().unwrap();

    // Then: Only user tables are monitored
    let names: Vec<&str> = changes.sources().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["actor", "movie"]);

    // When: Both tables change
    conn.execute("INSERT INTO actor (name) VALUES ('Bo')", [])
        .unwrap();
    mutate_movies(&conn);
    changes.mark_end().unwrap();

    assert_eq!(changes.changes_of_source("actor").unwrap().len(), 1);
    assert_eq!(changes.changes_of_source("movie").unwrap().len(), 3);
}

#[test]
fn test_missing_table_is_data_access_error() {
    let conn = setup_movie_db();
    let mut changes = Changes::on_tables(SqliteProvider::new(&conn), ["nope"]);

    let err = changes.mark_start().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DataAccess);
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_file_backed_database_sees_other_connections() {
    // Given: A file database written by one connection and read by another
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("movies.db");
    let writer = rowdelta_store::db::open(&path).unwrap();
    create_movies(&writer);
    let reader = rowdelta_store::db::open(&path).unwrap();

    let mut changes = Changes::on_tables(SqliteProvider::new(&reader), ["movie"]);
    changes.mark_start().unwrap();

    // When: The writer applies the reference mutation
    mutate_movies(&writer);
    changes.mark_end().unwrap();

    // Then: The reader's end capture reflects committed writes
    assert_eq!(changes.count().unwrap(), 3);
}
