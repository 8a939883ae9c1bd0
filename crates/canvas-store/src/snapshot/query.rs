//! Read-only snapshot query operations.

use canvas_core::model::snapshot::decode_payload;
use canvas_core::model::Snapshot;
use rusqlite::Connection;

use crate::errors::{from_rusqlite, storage_corrupt, Result};
use crate::timestamps::from_millis;

/// A raw row from the `snapshots` ledger table.
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    /// Ledger row id
    pub id: i64,
    /// Caller-supplied version number
    pub version: i64,
    /// Capture timestamp, milliseconds since epoch
    pub captured_at: i64,
    /// Serialized post sequence, exactly as stored
    pub snapshot_data: String,
}

/// List all snapshot rows without decoding payloads.
///
/// Results are ordered by `version` descending, then `id` descending, so the
/// most recent capture comes first among equal versions.
pub fn list_snapshot_rows(conn: &Connection) -> Result<Vec<SnapshotRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, version, captured_at, snapshot_data
             FROM snapshots ORDER BY version DESC, id DESC",
        )
        .map_err(from_rusqlite)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(SnapshotRow {
                id: row.get(0)?,
                version: row.get(1)?,
                captured_at: row.get(2)?,
                snapshot_data: row.get(3)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(rows)
}

/// Decode a ledger row into a `Snapshot`.
///
/// # Errors
///
/// - `StorageCorrupt`: payload is not a valid post sequence
pub fn decode_snapshot_row(row: SnapshotRow) -> Result<Snapshot> {
    let entity = format!("snapshot:{}", row.id);
    let posts = decode_payload(&row.snapshot_data).map_err(|e| {
        storage_corrupt(
            "decode_snapshot",
            entity.clone(),
            &format!("snapshot payload cannot be decoded: {}", e),
        )
    })?;

    Ok(Snapshot {
        id: row.id,
        version: row.version,
        captured_at: from_millis(row.captured_at, entity)?,
        posts,
    })
}

/// List and decode all snapshots.
///
/// Fails as a whole if any stored payload is corrupt.
pub fn list_snapshots(conn: &Connection) -> Result<Vec<Snapshot>> {
    list_snapshot_rows(conn)?
        .into_iter()
        .map(decode_snapshot_row)
        .collect()
}
