use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::post::Post;

/// PostVersion - an immutable copy of a post taken just before an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostVersion {
    pub version_id: i64,
    pub post_id: i64,
    pub owner: String,
    pub title: String,
    pub content: String,
    pub attributes: Attributes,
    /// When the pre-update state was archived
    pub captured_at: DateTime<Utc>,
}

impl PostVersion {
    /// Check whether this version holds the archived fields of `post`
    pub fn captures(&self, post: &Post) -> bool {
        self.post_id == post.id
            && self.owner == post.owner
            && self.title == post.title
            && self.content == post.content
            && self.attributes == post.attributes
    }
}
