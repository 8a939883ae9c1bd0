//! SQLite repository for posts and post history
//!
//! Every function takes a `&Connection`; pass `&tx` to run inside a
//! transaction.

use canvas_core::model::{Attributes, NewPost, Position, Post, PostVersion};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::errors::{from_rusqlite, storage_corrupt, Result};
use crate::timestamps::{from_millis, now_millis, to_millis};

const POST_COLUMNS: &str =
    "id, owner, title, content, position_x, position_y, attributes, created_at";

const VERSION_COLUMNS: &str =
    "version_id, post_id, owner, title, content, attributes, captured_at";

/// Rows removed by [`SqlitePostRepo::delete_post`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedRows {
    pub posts: usize,
    pub versions: usize,
}

/// Undecoded `posts` row
struct PostRow {
    id: i64,
    owner: String,
    title: String,
    content: String,
    position_x: f64,
    position_y: f64,
    attributes: Option<String>,
    created_at: i64,
}

impl PostRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            position_x: row.get(4)?,
            position_y: row.get(5)?,
            attributes: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_post(self) -> Result<Post> {
        let entity = format!("post:{}", self.id);
        Ok(Post {
            id: self.id,
            owner: self.owner,
            title: self.title,
            content: self.content,
            position: Position::new(self.position_x, self.position_y),
            attributes: decode_attributes(self.attributes.as_deref(), &entity)?,
            created_at: from_millis(self.created_at, entity)?,
        })
    }
}

/// Undecoded `post_versions` row
struct VersionRow {
    version_id: i64,
    post_id: i64,
    owner: String,
    title: String,
    content: String,
    attributes: Option<String>,
    captured_at: i64,
}

impl VersionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            version_id: row.get(0)?,
            post_id: row.get(1)?,
            owner: row.get(2)?,
            title: row.get(3)?,
            content: row.get(4)?,
            attributes: row.get(5)?,
            captured_at: row.get(6)?,
        })
    }

    fn into_version(self) -> Result<PostVersion> {
        let entity = format!("post_version:{}", self.version_id);
        Ok(PostVersion {
            version_id: self.version_id,
            post_id: self.post_id,
            owner: self.owner,
            title: self.title,
            content: self.content,
            attributes: decode_attributes(self.attributes.as_deref(), &entity)?,
            captured_at: from_millis(self.captured_at, entity)?,
        })
    }
}

/// NULL or blank text is an empty map; anything else must be a JSON object.
fn decode_attributes(text: Option<&str>, entity: &str) -> Result<Attributes> {
    Attributes::from_json_str(text.unwrap_or_default())
        .map_err(|e| storage_corrupt("decode_attributes", entity, &e.to_string()))
}

/// SQLite repository for posts and post versions
pub struct SqlitePostRepo;

impl SqlitePostRepo {
    /// Creation time for the next post
    ///
    /// The current time, clamped so it is never earlier than the newest stored
    /// post. Keeps `created_at` non-decreasing in insertion order even if the
    /// wall clock steps backwards.
    pub fn next_created_at(conn: &Connection) -> Result<DateTime<Utc>> {
        let newest: Option<i64> = conn
            .query_row("SELECT MAX(created_at) FROM posts", [], |row| row.get(0))
            .map_err(from_rusqlite)?;

        let now = now_millis();
        match newest {
            Some(ms) if ms > to_millis(now) => from_millis(ms, "posts"),
            _ => Ok(now),
        }
    }

    /// Insert a new post and return the stored record
    ///
    /// Defaults (origin position, empty attributes, guest owner) are resolved
    /// here; validation is the caller's job.
    pub fn insert_post(
        conn: &Connection,
        input: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<Post> {
        let position = input.resolved_position();
        let attributes = input.attributes.clone().unwrap_or_default();
        let owner = input.resolved_owner().to_string();

        conn.execute(
            "INSERT INTO posts (owner, title, content, position_x, position_y, attributes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                owner,
                input.title,
                input.content,
                position.x,
                position.y,
                attributes.to_json_string(),
                to_millis(created_at),
            ],
        )
        .map_err(from_rusqlite)?;

        let id = conn.last_insert_rowid();
        tracing::debug!(post_id = id, owner = %owner, "Inserted post");

        Ok(Post {
            id,
            owner,
            title: input.title.clone(),
            content: input.content.clone(),
            position,
            attributes,
            created_at,
        })
    }

    /// Get a post by ID
    pub fn get_post(conn: &Connection, post_id: i64) -> Result<Option<Post>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS),
                [post_id],
                PostRow::from_row,
            )
            .optional()
            .map_err(from_rusqlite)?;

        row.map(PostRow::into_post).transpose()
    }

    /// List all posts, newest first (ties broken by id, newest first)
    pub fn list_posts(conn: &Connection) -> Result<Vec<Post>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM posts ORDER BY created_at DESC, id DESC",
                POST_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([], PostRow::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(PostRow::into_post).collect()
    }

    /// Overwrite the mutable fields of an existing post
    ///
    /// Owner and `created_at` are left untouched. Returns `false` when no row
    /// has the post's id.
    pub fn overwrite_post(conn: &Connection, post: &Post) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE posts
                 SET title = ?1, content = ?2, position_x = ?3, position_y = ?4, attributes = ?5
                 WHERE id = ?6",
                rusqlite::params![
                    post.title,
                    post.content,
                    post.position.x,
                    post.position.y,
                    post.attributes.to_json_string(),
                    post.id,
                ],
            )
            .map_err(from_rusqlite)?;

        Ok(changed == 1)
    }

    /// Archive the current state of a post as a new version
    pub fn insert_version(
        conn: &Connection,
        post: &Post,
        captured_at: DateTime<Utc>,
    ) -> Result<PostVersion> {
        conn.execute(
            "INSERT INTO post_versions (post_id, owner, title, content, attributes, captured_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                post.id,
                post.owner,
                post.title,
                post.content,
                post.attributes.to_json_string(),
                to_millis(captured_at),
            ],
        )
        .map_err(from_rusqlite)?;

        let version_id = conn.last_insert_rowid();
        tracing::debug!(post_id = post.id, version_id = version_id, "Archived post version");

        Ok(PostVersion {
            version_id,
            post_id: post.id,
            owner: post.owner.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            attributes: post.attributes.clone(),
            captured_at,
        })
    }

    /// List versions of a post, most recently archived first
    ///
    /// Unknown post ids yield an empty list.
    pub fn list_versions(conn: &Connection, post_id: i64) -> Result<Vec<PostVersion>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM post_versions WHERE post_id = ?1
                 ORDER BY version_id DESC",
                VERSION_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([post_id], VersionRow::from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(VersionRow::into_version).collect()
    }

    /// Delete a post together with its history
    ///
    /// Versions are removed explicitly so the cascade holds even on a
    /// connection without `PRAGMA foreign_keys`. Call inside a transaction.
    pub fn delete_post(conn: &Connection, post_id: i64) -> Result<DeletedRows> {
        let versions = conn
            .execute("DELETE FROM post_versions WHERE post_id = ?1", [post_id])
            .map_err(from_rusqlite)?;
        let posts = conn
            .execute("DELETE FROM posts WHERE id = ?1", [post_id])
            .map_err(from_rusqlite)?;

        tracing::debug!(post_id = post_id, posts, versions, "Deleted post rows");

        Ok(DeletedRows { posts, versions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_board_in_memory;

    #[test]
    fn test_null_attributes_read_as_empty() {
        let conn = open_board_in_memory().unwrap();
        conn.execute(
            "INSERT INTO posts (title, content, attributes, created_at) VALUES ('t', 'c', NULL, 0)",
            [],
        )
        .unwrap();

        let post = SqlitePostRepo::get_post(&conn, 1).unwrap().unwrap();
        assert!(post.attributes.is_empty());
        assert_eq!(post.owner, "guest");
        assert_eq!(post.position, Position::ORIGIN);
    }

    #[test]
    fn test_corrupt_attributes_surface_as_storage_corrupt() {
        let conn = open_board_in_memory().unwrap();
        conn.execute(
            "INSERT INTO posts (title, content, attributes, created_at) VALUES ('t', 'c', '[oops', 0)",
            [],
        )
        .unwrap();

        let err = SqlitePostRepo::list_posts(&conn).unwrap_err();
        assert_eq!(err.kind(), canvas_core::ExErrorKind::StorageCorrupt);
        assert_eq!(err.entity_id(), Some("post:1"));
    }

    #[test]
    fn test_next_created_at_never_goes_backwards() {
        let conn = open_board_in_memory().unwrap();
        let future = to_millis(now_millis()) + 60_000;
        conn.execute(
            "INSERT INTO posts (title, content, created_at) VALUES ('t', 'c', ?1)",
            [future],
        )
        .unwrap();

        let next = SqlitePostRepo::next_created_at(&conn).unwrap();
        assert_eq!(to_millis(next), future);
    }
}
