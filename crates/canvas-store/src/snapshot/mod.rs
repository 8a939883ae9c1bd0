//! Snapshot ledger.
//!
//! ## Responsibilities
//!
//! - Encode a caller-supplied post sequence and insert one ledger row
//! - List ledger rows ordered by version, newest insert first on ties
//! - Decode stored payloads, treating undecodable payloads as corruption
//!
//! ## Non-Responsibilities
//!
//! - Deciding which posts go into a snapshot (handled by `canvas-engine`)
//! - Version uniqueness or ordering (versions are caller-controlled)

pub mod persist;
pub mod query;

// Re-export primary types
pub use persist::{insert_snapshot, SnapshotSaveResult};
pub use query::{decode_snapshot_row, list_snapshot_rows, list_snapshots, SnapshotRow};
