//! Snapshot service: save and list whole-board captures.
//!
//! A snapshot stores whatever post sequence the caller hands over, in the
//! caller's order. Nothing is checked against the live board, and the
//! version number is taken as given.

use canvas_core::errors::ExError;
use canvas_core::model::{Post, Snapshot};
use canvas_core::rules::validate_position;
use canvas_core::{log_op_end, log_op_error, log_op_start};
use canvas_store::errors::{from_rusqlite, Result};
use canvas_store::repo::SqlitePostRepo;
use canvas_store::snapshot::{insert_snapshot, list_snapshots as query_snapshots};
use canvas_store::timestamps::now_millis;
use rusqlite::Connection;
use std::time::Instant;

pub use canvas_store::snapshot::SnapshotSaveResult;

/// Every post in a payload must have finite coordinates, or the stored JSON
/// would not decode back into the same posts.
fn check_positions(op: &str, posts: &[Post]) -> Result<()> {
    for post in posts {
        validate_position(&post.position).map_err(|e| {
            ExError::from(e)
                .with_op(op)
                .with_entity_id(format!("post:{}", post.id))
        })?;
    }
    Ok(())
}

/// Save a caller-supplied post sequence as a new snapshot
///
/// ## Errors
///
/// - `InvalidInput`: a post has a NaN or infinite coordinate
/// - `Serialization`: the posts could not be encoded
/// - `Persistence`: database error
pub fn save_snapshot(version: i64, posts: &[Post], conn: &Connection) -> Result<SnapshotSaveResult> {
    log_op_start!(
        "save_snapshot",
        snapshot_version = version,
        post_count = posts.len()
    );
    let start = Instant::now();

    let result = check_positions("save_snapshot", posts)
        .and_then(|()| insert_snapshot(conn, version, posts, now_millis()));

    match result {
        Ok(saved) => {
            log_op_end!(
                "save_snapshot",
                duration_ms = start.elapsed().as_millis() as u64,
                snapshot_id = saved.snapshot_id
            );
            Ok(saved)
        }
        Err(e) => {
            log_op_error!(
                "save_snapshot",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// Save the current board as a snapshot
///
/// Reads the live posts and saves them in list order inside one transaction,
/// so the payload matches a single consistent view of the board.
///
/// ## Errors
///
/// - `StorageCorrupt`: a live post could not be decoded
/// - `InvalidInput`: a live post has a non-finite coordinate
/// - `Persistence`: database error
pub fn capture_board_snapshot(version: i64, conn: &mut Connection) -> Result<SnapshotSaveResult> {
    log_op_start!("capture_board_snapshot", snapshot_version = version);
    let start = Instant::now();

    let result = (|| -> Result<SnapshotSaveResult> {
        let tx = conn.transaction().map_err(from_rusqlite)?;
        let posts = SqlitePostRepo::list_posts(&tx)?;
        check_positions("capture_board_snapshot", &posts)?;
        let saved = insert_snapshot(&tx, version, &posts, now_millis())?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(saved)
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(saved) => {
            log_op_end!(
                "capture_board_snapshot",
                duration_ms = elapsed,
                snapshot_id = saved.snapshot_id,
                post_count = saved.post_count
            );
        }
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("capture_board_snapshot", e_clone, duration_ms = elapsed);
        }
    }
    result
}

/// List all snapshots with decoded payloads
///
/// Ordered by version descending; among equal versions the latest capture
/// comes first.
///
/// ## Errors
///
/// - `StorageCorrupt`: a stored payload no longer decodes (names the snapshot)
/// - `Persistence`: database error
pub fn list_snapshots(conn: &Connection) -> Result<Vec<Snapshot>> {
    log_op_start!("list_snapshots");
    let start = Instant::now();

    let result = query_snapshots(conn);

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(snapshots) => {
            log_op_end!(
                "list_snapshots",
                duration_ms = elapsed,
                row_count = snapshots.len()
            );
        }
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("list_snapshots", e_clone, duration_ms = elapsed);
        }
    }
    result
}
