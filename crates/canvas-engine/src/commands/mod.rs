//! Command orchestration layer.
//!
//! Provides high-level service functions that coordinate between
//! core domain logic and persistence layer.

pub mod board_command;
pub mod board_query;
pub mod posts;
pub mod snapshot;
