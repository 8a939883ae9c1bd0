// Integration tests for the migration framework

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = canvas_store::migrations::apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    // And: Every board table exists
    let tables = get_table_names(&conn);
    for expected_table in [
        "schema_version",
        "posts",
        "post_versions",
        "snapshots",
        "sqlite_sequence", // Auto-created by SQLite for AUTOINCREMENT columns
    ] {
        assert!(
            tables.contains(&expected_table.to_string()),
            "Missing table: {}",
            expected_table
        );
    }
    assert_eq!(tables.len(), 5, "Unexpected tables: {:?}", tables);
}

#[test]
fn test_migrations_recorded_in_order() {
    let mut conn = setup_test_db();
    canvas_store::migrations::apply_migrations(&mut conn).unwrap();

    let applied = canvas_store::migrations::applied_migrations(&conn).unwrap();
    assert_eq!(applied, vec!["001_posts", "002_snapshots"]);

    let checksums: Vec<String> = conn
        .prepare("SELECT checksum FROM schema_version ORDER BY id")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(checksums.iter().all(|c| c.len() == 64));
}

#[test]
fn test_migration_idempotency() {
    // Given: A database with migrations already applied
    let mut conn = setup_test_db();
    canvas_store::migrations::apply_migrations(&mut conn).unwrap();

    // When: Migrations are applied again
    let result = canvas_store::migrations::apply_migrations(&mut conn);

    // Then: Nothing is re-applied
    assert!(result.is_ok());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_edited_migration_fails_checksum() {
    // Given: A database whose recorded checksum no longer matches the SQL
    let mut conn = setup_test_db();
    canvas_store::migrations::apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_posts'",
        [],
    )
    .unwrap();

    // When / Then: Re-applying reports the mismatch
    let err = canvas_store::migrations::apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.kind(), canvas_core::ExErrorKind::ConstraintViolation);
    assert!(err.message().contains("001_posts"));
}

#[test]
fn test_migrations_on_file_database_survive_reopen() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("board.db");

    {
        let conn = canvas_store::db::open_board(&db_path).unwrap();
        conn.execute(
            "INSERT INTO posts (title, content, created_at) VALUES ('kept', 'c', 1)",
            [],
        )
        .unwrap();
    }

    let conn = canvas_store::db::open_board(&db_path).unwrap();
    let title: String = conn
        .query_row("SELECT title FROM posts", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "kept");
}
