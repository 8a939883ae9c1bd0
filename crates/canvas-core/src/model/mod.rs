pub mod attributes;
pub mod position;
pub mod post;
pub mod post_version;
pub mod snapshot;

pub use attributes::Attributes;
pub use position::Position;
pub use post::{NewPost, Post, PostUpdate, DEFAULT_OWNER};
pub use post_version::PostVersion;
pub use snapshot::Snapshot;
