//! Host configuration
//!
//! Every setting comes from a flag or its environment variable; flags win.

use canvas_core::errors::{ExError, ExErrorKind};
use canvas_core::logging_facility::Profile;
use clap::{Args, ValueEnum};
use rusqlite::Connection;
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct CliConfig {
    /// Board database file
    #[arg(long, global = true, env = "CANVAS_DB", default_value = ".canvas/board.db")]
    pub db: PathBuf,

    /// Log output format (stderr)
    #[arg(
        long,
        global = true,
        env = "CANVAS_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,
}

impl CliConfig {
    pub fn profile(&self) -> Profile {
        match self.log_format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }

    /// Open the configured board, creating its directory if needed
    ///
    /// # Errors
    /// * `Io` - the parent directory could not be created
    /// * `Persistence` / `ConstraintViolation` - open or migration failed
    pub fn open_board(&self) -> Result<Connection, ExError> {
        if let Some(parent) = self.db.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExError::new(ExErrorKind::Io)
                    .with_op("open_board")
                    .with_entity_id(parent.display().to_string())
                    .with_message(e.to_string())
            })?;
        }

        tracing::debug!(db = %self.db.display(), "Opening board");
        canvas_store::db::open_board(&self.db)
    }
}
