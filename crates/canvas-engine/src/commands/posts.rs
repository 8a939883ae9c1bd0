//! Post service: create, read, update and delete board posts.
//!
//! ## Update pipeline (in order):
//! 1. Validate title and content (no writes on failure)
//! 2. Open a transaction
//! 3. Load the current post (NotFound if absent)
//! 4. Archive the current state as a `PostVersion`
//! 5. Overwrite the post's mutable fields
//! 6. Commit and return the stored record
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for post operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

use canvas_core::errors::ExError;
use canvas_core::model::{NewPost, Post, PostUpdate, PostVersion};
use canvas_core::rules::validation::{validate_new_post, validate_post_update};
use canvas_core::{log_op_end, log_op_error, log_op_start};
use canvas_store::errors::{from_rusqlite, post_not_found, Result};
use canvas_store::repo::SqlitePostRepo;
use canvas_store::timestamps::now_millis;
use rusqlite::Connection;
use serde::Serialize;
use std::time::Instant;

/// Confirmation returned by [`delete_post`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedPost {
    pub id: i64,
    /// History rows removed with the post
    pub versions_removed: usize,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// List every post, newest first
///
/// ## Errors
///
/// - `Persistence`: database error
/// - `StorageCorrupt`: a stored attribute map no longer decodes
pub fn list_posts(conn: &Connection) -> Result<Vec<Post>> {
    log_op_start!("list_posts");
    let start = Instant::now();

    match SqlitePostRepo::list_posts(conn) {
        Ok(posts) => {
            log_op_end!(
                "list_posts",
                duration_ms = elapsed_ms(start),
                row_count = posts.len()
            );
            Ok(posts)
        }
        Err(e) => {
            log_op_error!("list_posts", e.clone(), duration_ms = elapsed_ms(start));
            Err(e.with_op("list_posts"))
        }
    }
}

/// Get a single post
///
/// ## Errors
///
/// - `NotFound`: no post has this id
/// - `Persistence`: database error
pub fn get_post(post_id: i64, conn: &Connection) -> Result<Post> {
    log_op_start!("get_post", post_id = post_id);
    let start = Instant::now();

    let result = SqlitePostRepo::get_post(conn, post_id)
        .and_then(|found| found.ok_or_else(|| post_not_found("get_post", post_id)));

    match &result {
        Ok(_) => {
            log_op_end!("get_post", duration_ms = elapsed_ms(start), post_id = post_id);
        }
        Err(e) => {
            log_op_error!(
                "get_post",
                e.clone(),
                duration_ms = elapsed_ms(start),
                post_id = post_id
            );
        }
    }
    result
}

/// Create a post and return the stored record
///
/// Title and content are validated before anything is written. `created_at`
/// is assigned here and never moves backwards relative to existing posts.
///
/// ## Errors
///
/// - `InvalidTitle` / `InvalidContent`: blank after trimming
/// - `Persistence`: database error
pub fn create_post(input: NewPost, conn: &mut Connection) -> Result<Post> {
    log_op_start!("create_post", owner = input.resolved_owner());
    let start = Instant::now();

    let result = create_post_impl(&input, conn).map_err(|e| {
        log_op_error!("create_post", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "create_post",
        duration_ms = elapsed_ms(start),
        post_id = result.id
    );

    Ok(result)
}

fn create_post_impl(input: &NewPost, conn: &mut Connection) -> Result<Post> {
    validate_new_post(input).map_err(|e| ExError::from(e).with_op("create_post"))?;

    let tx = conn.transaction().map_err(from_rusqlite)?;
    let created_at = SqlitePostRepo::next_created_at(&tx)?;
    let post = SqlitePostRepo::insert_post(&tx, input, created_at)?;
    tx.commit().map_err(from_rusqlite)?;

    Ok(post)
}

/// Update a post in place, archiving its previous state
///
/// The version insert and the overwrite share one transaction; either both
/// land or neither does. The returned record is read back after the write, so
/// `created_at` is the original creation time.
///
/// ## Errors
///
/// - `InvalidTitle` / `InvalidContent`: blank after trimming
/// - `NotFound`: no post has this id
/// - `Persistence`: database error
pub fn update_post(post_id: i64, update: PostUpdate, conn: &mut Connection) -> Result<Post> {
    log_op_start!("update_post", post_id = post_id);
    let start = Instant::now();

    let result = update_post_impl(post_id, &update, conn).map_err(|e| {
        log_op_error!(
            "update_post",
            e.clone(),
            duration_ms = elapsed_ms(start),
            post_id = post_id
        );
        e
    })?;

    log_op_end!(
        "update_post",
        duration_ms = elapsed_ms(start),
        post_id = post_id,
        version_id = result.1
    );

    Ok(result.0)
}

fn update_post_impl(
    post_id: i64,
    update: &PostUpdate,
    conn: &mut Connection,
) -> Result<(Post, i64)> {
    validate_post_update(update).map_err(|e| {
        ExError::from(e)
            .with_op("update_post")
            .with_entity_id(post_id.to_string())
    })?;

    let tx = conn.transaction().map_err(from_rusqlite)?;

    let current = SqlitePostRepo::get_post(&tx, post_id)?
        .ok_or_else(|| post_not_found("update_post", post_id))?;

    let version = SqlitePostRepo::insert_version(&tx, &current, now_millis())?;

    if !SqlitePostRepo::overwrite_post(&tx, &update.apply_to(&current))? {
        return Err(post_not_found("update_post", post_id));
    }

    let stored = SqlitePostRepo::get_post(&tx, post_id)?
        .ok_or_else(|| post_not_found("update_post", post_id))?;

    tx.commit().map_err(from_rusqlite)?;

    Ok((stored, version.version_id))
}

/// Delete a post and its entire history
///
/// ## Errors
///
/// - `NotFound`: no post has this id (nothing is removed)
/// - `Persistence`: database error
pub fn delete_post(post_id: i64, conn: &mut Connection) -> Result<DeletedPost> {
    log_op_start!("delete_post", post_id = post_id);
    let start = Instant::now();

    let result = delete_post_impl(post_id, conn).map_err(|e| {
        log_op_error!(
            "delete_post",
            e.clone(),
            duration_ms = elapsed_ms(start),
            post_id = post_id
        );
        e
    })?;

    log_op_end!(
        "delete_post",
        duration_ms = elapsed_ms(start),
        post_id = post_id,
        row_count = result.versions_removed
    );

    Ok(result)
}

fn delete_post_impl(post_id: i64, conn: &mut Connection) -> Result<DeletedPost> {
    let tx = conn.transaction().map_err(from_rusqlite)?;

    let deleted = SqlitePostRepo::delete_post(&tx, post_id)?;
    if deleted.posts == 0 {
        // Dropping the transaction rolls back the version delete
        return Err(post_not_found("delete_post", post_id));
    }

    tx.commit().map_err(from_rusqlite)?;

    Ok(DeletedPost {
        id: post_id,
        versions_removed: deleted.versions,
    })
}

/// List the archived versions of a post, newest first
///
/// Unknown ids are not an error; they simply have no history.
///
/// ## Errors
///
/// - `Persistence`: database error
pub fn list_versions(post_id: i64, conn: &Connection) -> Result<Vec<PostVersion>> {
    log_op_start!("list_versions", post_id = post_id);
    let start = Instant::now();

    match SqlitePostRepo::list_versions(conn, post_id) {
        Ok(versions) => {
            log_op_end!(
                "list_versions",
                duration_ms = elapsed_ms(start),
                post_id = post_id,
                row_count = versions.len()
            );
            Ok(versions)
        }
        Err(e) => {
            log_op_error!(
                "list_versions",
                e.clone(),
                duration_ms = elapsed_ms(start),
                post_id = post_id
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_core::model::Position;
    use canvas_core::ExErrorKind;
    use canvas_store::db::open_board_in_memory;

    #[test]
    fn test_invalid_create_writes_nothing() {
        let mut conn = open_board_in_memory().unwrap();

        let err = create_post(NewPost::new("   ", "x"), &mut conn).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidTitle);
        assert_eq!(err.op(), Some("create_post"));
        assert!(list_posts(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_update_leaves_no_version() {
        let mut conn = open_board_in_memory().unwrap();
        let post = create_post(NewPost::new("A", "x"), &mut conn).unwrap();

        let err = update_post(post.id, PostUpdate::new("B", "\n\t", Position::ORIGIN), &mut conn)
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::InvalidContent);
        assert!(list_versions(post.id, &conn).unwrap().is_empty());
        assert_eq!(get_post(post.id, &conn).unwrap(), post);
    }

    #[test]
    fn test_validation_precedes_lookup() {
        let mut conn = open_board_in_memory().unwrap();

        let err =
            update_post(42, PostUpdate::new("", "x", Position::ORIGIN), &mut conn).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidTitle);
    }
}
