//! Canvas Store - SQLite persistence for posts, post history and snapshots
//!
//! Provides:
//! - Connection management (`db`)
//! - Embedded, checksummed schema migrations
//! - Post and post-version repository
//! - Snapshot ledger persistence and queries

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod snapshot;
pub mod timestamps;

// Re-export key types
pub use errors::Result;
