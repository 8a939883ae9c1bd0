//! Repository layer for persisting board records to SQLite

pub mod post_repo;

pub use post_repo::{DeletedRows, SqlitePostRepo};
