//! CLI integration tests
//!
//! These tests run the built `canvas` binary against a scratch database and
//! check its JSON output, exit codes and the rows it leaves behind.

use rusqlite::Connection;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("nested").join("board.db")
}

fn run(db: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_canvas");
    Command::new(cli_bin)
        .args(args)
        .arg("--db")
        .arg(db)
        .env_remove("CANVAS_DB")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn run_ok(db: &Path, args: &[&str]) -> Value {
    let output = run(db, args);
    assert!(
        output.status.success(),
        "CLI {:?} should succeed. Stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_init_creates_database_and_reports_migrations() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let out = run_ok(&db, &["init"]);

    assert!(db.exists());
    assert_eq!(
        out["migrations"],
        serde_json::json!(["001_posts", "002_snapshots"])
    );
}

#[test]
fn test_post_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let created = run_ok(
        &db,
        &[
            "post", "create", "--title", "A", "--content", "x", "--x", "1", "--y", "2",
        ],
    );
    assert_eq!(created["id"], 1);
    assert_eq!(created["owner"], "guest");
    assert_eq!(created["position"]["x"], 1.0);
    assert_eq!(created["position"]["y"], 2.0);

    let updated = run_ok(
        &db,
        &[
            "post", "update", "1", "--title", "B", "--content", "x", "--x", "-3.5", "--y", "2",
        ],
    );
    assert_eq!(updated["title"], "B");
    assert_eq!(updated["position"]["x"], -3.5);
    assert_eq!(updated["created_at"], created["created_at"]);

    let versions = run_ok(&db, &["post", "versions", "1"]);
    assert_eq!(versions.as_array().unwrap().len(), 1);
    assert_eq!(versions[0]["title"], "A");

    let listed = run_ok(&db, &["post", "list"]);
    assert_eq!(listed[0]["title"], "B");

    let deleted = run_ok(&db, &["post", "delete", "1"]);
    assert_eq!(deleted["id"], 1);

    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM post_versions", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0, "history should be removed with the post");
}

#[test]
fn test_create_with_attributes_and_owner() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let created = run_ok(
        &db,
        &[
            "post",
            "create",
            "--title",
            "Todo",
            "--content",
            "Buy milk",
            "--attributes",
            r#"{"color":"yellow","w":120}"#,
            "--owner",
            "ana",
        ],
    );

    assert_eq!(created["owner"], "ana");
    assert_eq!(created["attributes"]["color"], "yellow");
    assert_eq!(created["attributes"]["w"], 120);

    let fetched = run_ok(&db, &["post", "get", "1"]);
    assert_eq!(fetched, created);
}

#[test]
fn test_blank_title_exits_with_client_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(&db, &["post", "create", "--title", "  ", "--content", "x"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("ERR_INVALID_TITLE"));
}

#[test]
fn test_missing_post_exits_with_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(&db, &["post", "delete", "42"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_non_object_attributes_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(
        &db,
        &[
            "post", "create", "--title", "A", "--content", "x", "--attributes", "[1,2]",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}

#[test]
fn test_snapshot_save_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    run_ok(&db, &["post", "create", "--title", "A", "--content", "x"]);

    let first = run_ok(&db, &["snapshot", "save", "--version", "1"]);
    assert_eq!(first["version"], 1);
    assert_eq!(first["post_count"], 1);

    let posts_file = temp_dir.path().join("posts.json");
    std::fs::write(
        &posts_file,
        r#"[{"id": 7, "user_id": "bob", "title": "T", "content": "C",
             "position": {"x": 0.5, "y": 0.25}, "dimensions": {"h": 3},
             "created_at": "2024-01-02T03:04:05.678Z"}]"#,
    )
    .unwrap();

    let second = run_ok(
        &db,
        &[
            "snapshot",
            "save",
            "--version",
            "1",
            "--posts",
            posts_file.to_str().unwrap(),
        ],
    );
    assert_eq!(second["post_count"], 1);

    let listed = run_ok(&db, &["snapshot", "list"]);
    let snapshots = listed.as_array().unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0]["id"], second["id"]);
    assert_eq!(snapshots[0]["posts"][0]["owner"], "bob");
    assert_eq!(snapshots[0]["posts"][0]["attributes"]["h"], 3);
    assert_eq!(snapshots[1]["posts"][0]["title"], "A");
}

#[test]
fn test_snapshot_save_with_missing_file_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    run_ok(&db, &["init"]);

    let output = run(
        &db,
        &["snapshot", "save", "--version", "1", "--posts", "/nonexistent/posts.json"],
    );

    assert_eq!(output.status.code(), Some(2));

    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_db_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("env.db");

    let output = Command::new(env!("CARGO_BIN_EXE_canvas"))
        .args(["post", "list"])
        .env("CANVAS_DB", &db)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    assert!(db.exists());
    assert_eq!(
        serde_json::from_slice::<Value>(&output.stdout).unwrap(),
        serde_json::json!([])
    );
}

#[test]
fn test_non_finite_coordinates_exit_with_client_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    for bad in ["NaN", "inf"] {
        let output = run(
            &db,
            &["post", "create", "--title", "A", "--content", "x", "--x", bad],
        );

        assert_eq!(output.status.code(), Some(1), "--x {} should be rejected", bad);
        assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
    }

    let listed = run_ok(&db, &["post", "list"]);
    assert_eq!(listed, serde_json::json!([]));
}

#[test]
fn test_snapshot_payload_with_flat_coordinates() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let posts_file = temp_dir.path().join("posts.json");
    std::fs::write(
        &posts_file,
        r#"[{"id": 1, "title": "T", "content": "C", "position_x": 5.5, "position_y": 7.0,
             "created_at": "2024-01-02T03:04:05Z"}]"#,
    )
    .unwrap();

    run_ok(
        &db,
        &[
            "snapshot",
            "save",
            "--version",
            "1",
            "--posts",
            posts_file.to_str().unwrap(),
        ],
    );

    let listed = run_ok(&db, &["snapshot", "list"]);
    assert_eq!(
        listed[0]["posts"][0]["position"],
        serde_json::json!({"x": 5.5, "y": 7.0})
    );
}
