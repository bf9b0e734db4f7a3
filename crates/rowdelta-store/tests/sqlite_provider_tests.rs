// Integration tests for SqliteProvider
// Covers declared-type mapping, key discovery and read order

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{NaiveDate, NaiveTime};
use common::setup_movie_db;
use rowdelta_core::{
    DataSource, RawValue, RequestSource, RowProvider, SnapshotCapture, ValueType,
};
use rowdelta_store::SqliteProvider;

#[test]
fn test_declared_types_map_to_value_types() {
    // Given: A row covering every declared type the provider refines
    let conn = setup_movie_db();
    conn.execute_batch(
        "CREATE TABLE showing (
             id INTEGER PRIMARY KEY,
             price DECIMAL(10,2),
             subtitled BOOLEAN,
             day DATE,
             starts TIME,
             sold_at DATETIME,
             poster BLOB,
             note TEXT
         );
         INSERT INTO showing VALUES
             (1, '12.50', 1, '2014-05-24', '09:01:06', '2014-05-24 10:00:00', x'010203', NULL);",
    )
    .unwrap();

    // When: The table is captured
    let provider = SqliteProvider::new(&conn);
    let mut capture = SnapshotCapture::default();
    let snapshot = capture
        .capture(&provider, &DataSource::table("showing"))
        .unwrap();
    let row = snapshot.row(0).unwrap();

    // Then: Each column carries the value type of its declaration
    let types: Vec<ValueType> = row.values().iter().map(|v| v.value_type()).collect();
    assert_eq!(
        types,
        vec![
            ValueType::Number,
            ValueType::Number,
            ValueType::Boolean,
            ValueType::Date,
            ValueType::Time,
            ValueType::DateTime,
            ValueType::Bytes,
            ValueType::NotIdentified,
        ]
    );

    // And: Values compare against their natural literals
    assert!(row.value_by_name("price").unwrap().is_equal_to("12.50").unwrap());
    assert!(row.value_by_name("subtitled").unwrap().is_equal_to(true).unwrap());
    assert!(row
        .value_by_name("day")
        .unwrap()
        .is_equal_to(NaiveDate::from_ymd_opt(2014, 5, 24).unwrap())
        .unwrap());
    assert!(row
        .value_by_name("starts")
        .unwrap()
        .is_equal_to("09:01:06")
        .unwrap());
    assert!(row
        .value_by_name("sold_at")
        .unwrap()
        .is_equal_to("2014-05-24T10:00:00")
        .unwrap());
    assert!(row.value_by_name("note").unwrap().is_null());
}

#[test]
fn test_unparseable_declared_text_stays_text() {
    let conn = setup_movie_db();
    conn.execute_batch(
        "CREATE TABLE diary (id INTEGER PRIMARY KEY, day DATE);
         INSERT INTO diary VALUES (1, 'someday');",
    )
    .unwrap();

    let set = SqliteProvider::new(&conn)
        .read(&DataSource::table("diary"))
        .unwrap();
    assert_eq!(set.rows[0][1], RawValue::Text("someday".into()));
}

#[test]
fn test_composite_key_follows_declaration_order() {
    // Given: A key declared in a different order than the columns
    let conn = setup_movie_db();
    conn.execute_batch(
        "CREATE TABLE cast_member (
             movie_id INTEGER,
             actor_id INTEGER,
             role TEXT,
             PRIMARY KEY (actor_id, movie_id)
         );
         INSERT INTO cast_member VALUES (2, 1, 'lead'), (1, 2, 'extra'), (1, 1, 'cameo');",
    )
    .unwrap();
    let provider = SqliteProvider::new(&conn);

    // Then: Key columns come back in key order
    assert_eq!(
        provider.primary_key_columns("cast_member").unwrap(),
        vec!["actor_id".to_string(), "movie_id".to_string()]
    );

    // And: Rows are read in key order
    let set = provider.read(&DataSource::table("cast_member")).unwrap();
    let roles: Vec<&RawValue> = set.rows.iter().map(|r| &r[2]).collect();
    assert_eq!(
        roles,
        vec![
            &RawValue::from("cameo"),
            &RawValue::from("lead"),
            &RawValue::from("extra"),
        ]
    );
}

#[test]
fn test_table_without_key_reports_none() {
    let conn = setup_movie_db();
    conn.execute("CREATE TABLE log (message TEXT)", []).unwrap();

    let provider = SqliteProvider::new(&conn);
    assert!(provider.primary_key_columns("log").unwrap().is_empty());
    assert!(provider.read(&DataSource::table("log")).unwrap().rows.is_empty());
}

#[test]
fn test_table_names_are_sorted_user_tables() {
    let conn = setup_movie_db();
    conn.execute(
        "CREATE TABLE actor (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO actor (name) VALUES ('Ann')", [])
        .unwrap();

    let names = SqliteProvider::new(&conn).table_names().unwrap();
    assert_eq!(names, vec!["actor".to_string(), "movie".to_string()]);
}

#[test]
fn test_request_parameters_are_bound() {
    let conn = setup_movie_db();
    conn.execute_batch(
        "CREATE TABLE screening (id INTEGER PRIMARY KEY, day DATE, starts TIME, open BOOLEAN);
         INSERT INTO screening VALUES (1, '2014-05-24', '09:00:00', 1), (2, '2014-05-25', '21:00:00', 0);",
    )
    .unwrap();

    let request = RequestSource::new(
        "SELECT id FROM screening WHERE day = ?1 AND starts = ?2 AND open = ?3",
    )
    .with_parameters(vec![
        NaiveDate::from_ymd_opt(2014, 5, 24).unwrap().into(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap().into(),
        true.into(),
    ]);

    let set = SqliteProvider::new(&conn)
        .read(&DataSource::Request(request))
        .unwrap();
    assert_eq!(set.columns, vec!["id".to_string()]);
    assert_eq!(set.rows, vec![vec![RawValue::Int(1)]]);
}

#[test]
fn test_invalid_sql_is_data_access_error() {
    let conn = setup_movie_db();
    let err = SqliteProvider::new(&conn)
        .read(&DataSource::Request(RequestSource::new("SELEC nothing")))
        .unwrap_err();
    assert_eq!(err.kind(), rowdelta_core::ExErrorKind::DataAccess);
}
