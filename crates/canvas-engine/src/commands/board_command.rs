//! Board-level mutating commands.
//!
//! `apply_board_command` is the single entry point for every write a host
//! performs. Each call runs under a [`RequestContext`]; the request id is
//! attached to the tracing span and to any error returned.

use canvas_core::model::{NewPost, Post, PostUpdate};
use canvas_core_types::RequestContext;
use canvas_store::errors::Result;
use rusqlite::Connection;

use crate::commands::posts::{self, DeletedPost};
use crate::commands::snapshot::{self, SnapshotSaveResult};

/// Commands that write to the board.
#[derive(Debug, Clone)]
pub enum BoardCommand {
    /// Create a new post.
    PostCreate(NewPost),
    /// Overwrite a post, archiving its previous state.
    PostUpdate { post_id: i64, update: PostUpdate },
    /// Delete a post and its history.
    PostDelete { post_id: i64 },
    /// Save a snapshot. `posts: None` captures the live board.
    SnapshotSave {
        version: i64,
        posts: Option<Vec<Post>>,
    },
}

impl BoardCommand {
    /// Operation name used in spans
    pub fn op_name(&self) -> &'static str {
        match self {
            BoardCommand::PostCreate(_) => "post_create",
            BoardCommand::PostUpdate { .. } => "post_update",
            BoardCommand::PostDelete { .. } => "post_delete",
            BoardCommand::SnapshotSave { .. } => "snapshot_save",
        }
    }
}

/// Result of applying a board command.
#[derive(Debug, Clone)]
pub enum BoardCommandResult {
    PostCreated(Post),
    PostUpdated(Post),
    PostDeleted(DeletedPost),
    SnapshotSaved(SnapshotSaveResult),
}

/// Apply a board command.
///
/// ## Errors
///
/// Whatever the underlying service returns, tagged with the request id.
pub fn apply_board_command(
    cmd: BoardCommand,
    conn: &mut Connection,
    ctx: &RequestContext,
) -> Result<BoardCommandResult> {
    let span = tracing::info_span!(
        "board_command",
        op = cmd.op_name(),
        request_id = %ctx.request_id,
        caller = ctx.caller.as_deref().unwrap_or("")
    );
    let _guard = span.enter();

    let result = match cmd {
        BoardCommand::PostCreate(input) => {
            posts::create_post(input, conn).map(BoardCommandResult::PostCreated)
        }
        BoardCommand::PostUpdate { post_id, update } => {
            posts::update_post(post_id, update, conn).map(BoardCommandResult::PostUpdated)
        }
        BoardCommand::PostDelete { post_id } => {
            posts::delete_post(post_id, conn).map(BoardCommandResult::PostDeleted)
        }
        BoardCommand::SnapshotSave { version, posts } => match posts {
            Some(posts) => snapshot::save_snapshot(version, &posts, conn),
            None => snapshot::capture_board_snapshot(version, conn),
        }
        .map(BoardCommandResult::SnapshotSaved),
    };

    result.map_err(|e| e.with_request_id(ctx.request_id.clone()))
}
