use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::position::Position;

/// Owner label used when the caller does not supply one
pub const DEFAULT_OWNER: &str = "guest";

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

/// Post - a positioned note on the canvas
///
/// `id` and `created_at` are assigned by the store on creation and never change
/// afterwards. `owner` is an opaque label with no identity behind it.
///
/// Input also accepts the legacy keys `user_id` (owner), `dimensions`
/// (attributes) and flat `position_x` / `position_y` coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PostWire")]
pub struct Post {
    /// Store-assigned identifier, never reused
    pub id: i64,

    /// Free-text owner label
    pub owner: String,

    pub title: String,

    pub content: String,

    pub position: Position,

    /// Extensible attributes
    pub attributes: Attributes,

    /// Timestamp when this Post was created
    pub created_at: DateTime<Utc>,
}

/// Accepted input shape of a [`Post`]
#[derive(Deserialize)]
struct PostWire {
    id: i64,
    #[serde(default = "default_owner", alias = "user_id")]
    owner: String,
    title: String,
    content: String,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    position_x: Option<f64>,
    #[serde(default)]
    position_y: Option<f64>,
    #[serde(default, alias = "dimensions")]
    attributes: Attributes,
    created_at: DateTime<Utc>,
}

impl From<PostWire> for Post {
    fn from(wire: PostWire) -> Self {
        Post {
            id: wire.id,
            owner: wire.owner,
            title: wire.title,
            content: wire.content,
            position: Position::from_wire(wire.position, wire.position_x, wire.position_y)
                .unwrap_or_default(),
            attributes: wire.attributes,
            created_at: wire.created_at,
        }
    }
}

/// Input for creating a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NewPostWire")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub position: Option<Position>,
    pub attributes: Option<Attributes>,
    pub owner: Option<String>,
}

#[derive(Deserialize)]
struct NewPostWire {
    title: String,
    content: String,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    position_x: Option<f64>,
    #[serde(default)]
    position_y: Option<f64>,
    #[serde(default, alias = "dimensions")]
    attributes: Option<Attributes>,
    #[serde(default, alias = "user_id")]
    owner: Option<String>,
}

impl From<NewPostWire> for NewPost {
    fn from(wire: NewPostWire) -> Self {
        NewPost {
            title: wire.title,
            content: wire.content,
            position: Position::from_wire(wire.position, wire.position_x, wire.position_y),
            attributes: wire.attributes,
            owner: wire.owner,
        }
    }
}

impl NewPost {
    /// Create input with the required fields; everything else defaults
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            position: None,
            attributes: None,
            owner: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Position to store, defaulting to the origin
    pub fn resolved_position(&self) -> Position {
        self.position.unwrap_or_default()
    }

    /// Owner to store, defaulting to [`DEFAULT_OWNER`]
    pub fn resolved_owner(&self) -> &str {
        self.owner.as_deref().unwrap_or(DEFAULT_OWNER)
    }
}

/// Input for updating a post in place
///
/// `attributes: None` keeps the post's current attributes. Owner and
/// creation time are never touched by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PostUpdateWire")]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub position: Position,
    pub attributes: Option<Attributes>,
}

#[derive(Deserialize)]
struct PostUpdateWire {
    title: String,
    content: String,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    position_x: Option<f64>,
    #[serde(default)]
    position_y: Option<f64>,
    #[serde(default, alias = "dimensions")]
    attributes: Option<Attributes>,
}

impl From<PostUpdateWire> for PostUpdate {
    fn from(wire: PostUpdateWire) -> Self {
        PostUpdate {
            title: wire.title,
            content: wire.content,
            position: Position::from_wire(wire.position, wire.position_x, wire.position_y)
                .unwrap_or_default(),
            attributes: wire.attributes,
        }
    }
}

impl PostUpdate {
    pub fn new(title: impl Into<String>, content: impl Into<String>, position: Position) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            position,
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Apply this update to a post, returning the overwritten record
    pub fn apply_to(&self, post: &Post) -> Post {
        Post {
            id: post.id,
            owner: post.owner.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            position: self.position,
            attributes: self
                .attributes
                .clone()
                .unwrap_or_else(|| post.attributes.clone()),
            created_at: post.created_at,
        }
    }
}
