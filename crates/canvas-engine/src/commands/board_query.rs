//! Board-level read-only query surface.
//!
//! `apply_board_query` is the single entry point for all read-only queries.
//! Unlike `apply_board_command`, it accepts a shared (non-mutable) connection
//! and never writes to the DB.

use canvas_core::model::{Post, PostVersion, Snapshot};
use canvas_core_types::RequestContext;
use canvas_store::errors::Result;
use rusqlite::Connection;

use crate::commands::{posts, snapshot};

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardQuery {
    /// List every post, newest first.
    PostList,
    /// Get one post by id.
    PostGet { post_id: i64 },
    /// List a post's archived versions, newest first.
    PostVersions { post_id: i64 },
    /// List every snapshot with decoded payloads.
    SnapshotList,
}

impl BoardQuery {
    /// Operation name used in spans
    pub fn op_name(&self) -> &'static str {
        match self {
            BoardQuery::PostList => "post_list",
            BoardQuery::PostGet { .. } => "post_get",
            BoardQuery::PostVersions { .. } => "post_versions",
            BoardQuery::SnapshotList => "snapshot_list",
        }
    }
}

/// Result of a board query.
#[derive(Debug, Clone)]
pub enum BoardQueryResult {
    Posts(Vec<Post>),
    Post(Post),
    Versions(Vec<PostVersion>),
    Snapshots(Vec<Snapshot>),
}

/// Apply a read-only board query.
///
/// ## Errors
///
/// Whatever the underlying service returns, tagged with the request id.
pub fn apply_board_query(
    query: BoardQuery,
    conn: &Connection,
    ctx: &RequestContext,
) -> Result<BoardQueryResult> {
    let span = tracing::info_span!(
        "board_query",
        op = query.op_name(),
        request_id = %ctx.request_id
    );
    let _guard = span.enter();

    let result = match query {
        BoardQuery::PostList => posts::list_posts(conn).map(BoardQueryResult::Posts),
        BoardQuery::PostGet { post_id } => {
            posts::get_post(post_id, conn).map(BoardQueryResult::Post)
        }
        BoardQuery::PostVersions { post_id } => {
            posts::list_versions(post_id, conn).map(BoardQueryResult::Versions)
        }
        BoardQuery::SnapshotList => {
            snapshot::list_snapshots(conn).map(BoardQueryResult::Snapshots)
        }
    };

    result.map_err(|e| e.with_request_id(ctx.request_id.clone()))
}
