//! Canvas Engine - Orchestration layer
//!
//! Provides the post and snapshot services plus the command/query surface
//! that hosts dispatch through. Coordinates validation rules from
//! `canvas-core` with persistence in `canvas-store`.

pub mod commands;
