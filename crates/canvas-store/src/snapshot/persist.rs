//! Snapshot persistence operations.

use canvas_core::errors::{ExError, ExErrorKind};
use canvas_core::model::snapshot::encode_payload;
use canvas_core::model::Post;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::Result;
use crate::timestamps::to_millis;

/// Result of saving a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSaveResult {
    /// Ledger row id
    pub snapshot_id: i64,
    /// Caller-supplied version number, stored as given
    pub version: i64,
    /// Capture timestamp assigned at insert
    pub captured_at: DateTime<Utc>,
    /// Number of posts in the payload
    pub post_count: usize,
}

/// Insert one snapshot ledger row.
///
/// The post sequence is serialized as-is, in caller order; nothing is checked
/// against the live `posts` table.
///
/// ## Errors
///
/// - `ExErrorKind::Serialization`: payload encoding failed
/// - `ExErrorKind::Persistence`: database insert failed
pub fn insert_snapshot(
    conn: &Connection,
    version: i64,
    posts: &[Post],
    captured_at: DateTime<Utc>,
) -> Result<SnapshotSaveResult> {
    let payload = encode_payload(posts).map_err(|e| {
        ExError::from(e)
            .with_op("insert_snapshot")
            .with_message("Failed to serialize snapshot payload")
    })?;

    conn.execute(
        "INSERT INTO snapshots (version, captured_at, snapshot_data) VALUES (?1, ?2, ?3)",
        rusqlite::params![version, to_millis(captured_at), payload],
    )
    .map_err(|e| {
        ExError::new(ExErrorKind::Persistence)
            .with_op("insert_snapshot")
            .with_message(format!("Failed to insert snapshot: {}", e))
    })?;

    let snapshot_id = conn.last_insert_rowid();

    tracing::debug!(
        snapshot_id = snapshot_id,
        version = version,
        size_bytes = payload.len(),
        post_count = posts.len(),
        "Created snapshot ledger entry"
    );

    Ok(SnapshotSaveResult {
        snapshot_id,
        version,
        captured_at,
        post_count: posts.len(),
    })
}
