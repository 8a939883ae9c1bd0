//! Error handling for canvas-store
//!
//! Wraps canvas-core ExError with store-specific helpers

use canvas_core::errors::{CanvasError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a not-found error for a post id
pub fn post_not_found(op: &str, post_id: i64) -> ExError {
    ExError::from(CanvasError::PostNotFound { post_id }).with_op(op.to_string())
}

/// Create an error for a stored value that no longer decodes
pub fn storage_corrupt(op: &str, entity_id: impl Into<String>, reason: &str) -> ExError {
    ExError::new(ExErrorKind::StorageCorrupt)
        .with_op(op.to_string())
        .with_entity_id(entity_id)
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}
