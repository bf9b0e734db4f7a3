use rusqlite::Connection;

/// In-memory database with the `movie` table holding {1, "Test2"} and {2, "Test3"}
#[allow(dead_code)]
pub fn setup_movie_db() -> Connection {
    let conn = rowdelta_store::db::open_in_memory().expect("Failed to create in-memory database");
    rowdelta_store::db::configure(&conn).unwrap();
    create_movies(&conn);
    conn
}

#[allow(dead_code)]
pub fn create_movies(conn: &Connection) {
    conn.execute_batch(
        "CREATE TABLE movie (id INTEGER PRIMARY KEY, title VARCHAR(40) NOT NULL);
         INSERT INTO movie (id, title) VALUES (1, 'Test2'), (2, 'Test3');",
    )
    .unwrap();
}

/// Apply the reference mutation: add 5, retitle 1, remove 2
#[allow(dead_code)]
pub fn mutate_movies(conn: &Connection) {
    conn.execute("INSERT INTO movie (id, title) VALUES (5, 'Test')", [])
        .unwrap();
    conn.execute("UPDATE movie SET title = 'Test4' WHERE id = 1", [])
        .unwrap();
    conn.execute("DELETE FROM movie WHERE id = 2", []).unwrap();
}
