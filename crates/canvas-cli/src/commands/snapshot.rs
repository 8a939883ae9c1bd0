//! Snapshot commands

use canvas_core::errors::{ExError, ExErrorKind};
use canvas_core::model::Post;
use canvas_engine::commands::board_command::{
    apply_board_command, BoardCommand, BoardCommandResult,
};
use canvas_engine::commands::board_query::{apply_board_query, BoardQuery, BoardQueryResult};
use clap::{Args, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};

use super::{print_json, request_context};
use crate::config::CliConfig;

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    #[command(subcommand)]
    pub command: SnapshotCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnapshotCommand {
    /// Save a snapshot of the board (or of the posts in --posts)
    Save(SaveArgs),
    /// List snapshots, highest version first
    List,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub version: i64,

    /// JSON file holding an array of posts; defaults to the live board
    #[arg(long)]
    pub posts: Option<PathBuf>,
}

fn read_posts(path: &Path) -> Result<Vec<Post>, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("read_posts")
            .with_entity_id(path.display().to_string())
            .with_message(e.to_string())
    })?;

    serde_json::from_str(&text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("read_posts")
            .with_entity_id(path.display().to_string())
            .with_message(format!("Expected a JSON array of posts: {}", e))
    })
}

pub fn execute(args: SnapshotArgs, config: &CliConfig) -> Result<(), ExError> {
    match args.command {
        SnapshotCommand::Save(save) => execute_save(save, config),
        SnapshotCommand::List => execute_list(config),
    }
}

fn execute_save(args: SaveArgs, config: &CliConfig) -> Result<(), ExError> {
    // Read the file before touching the board so a bad file leaves no trace
    let posts = args.posts.as_deref().map(read_posts).transpose()?;

    let mut conn = config.open_board()?;
    let cmd = BoardCommand::SnapshotSave {
        version: args.version,
        posts,
    };

    match apply_board_command(cmd, &mut conn, &request_context())? {
        BoardCommandResult::SnapshotSaved(saved) => print_json(&json!({
            "id": saved.snapshot_id,
            "version": saved.version,
            "captured_at": saved.captured_at,
            "post_count": saved.post_count,
        })),
        other => Err(ExError::new(ExErrorKind::Internal)
            .with_op("snapshot_save")
            .with_message(format!("Unexpected engine result: {:?}", other))),
    }
}

fn execute_list(config: &CliConfig) -> Result<(), ExError> {
    let conn = config.open_board()?;

    match apply_board_query(BoardQuery::SnapshotList, &conn, &request_context())? {
        BoardQueryResult::Snapshots(snapshots) => print_json(&snapshots),
        other => Err(ExError::new(ExErrorKind::Internal)
            .with_op("snapshot_list")
            .with_message(format!("Unexpected engine result: {:?}", other))),
    }
}
