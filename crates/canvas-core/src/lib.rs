//! Canvas Core - domain model, rules, and shared facilities
//!
//! This crate provides:
//! - Post, PostVersion and Snapshot models with their input shapes
//! - Validation rules applied before any write
//! - The structured error facility (`ExError`, `ExErrorKind`, `CanvasError`)
//! - The structured logging facility and its test capture layer

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Used by the exported logging macros
pub use canvas_core_types as core_types;

// Re-export commonly used types
pub use errors::{CanvasError, ExError, ExErrorKind, Result};
pub use model::{Attributes, NewPost, Position, Post, PostUpdate, PostVersion, Snapshot};
