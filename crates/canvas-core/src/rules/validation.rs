use crate::errors::{CanvasError, Result};
use crate::model::{NewPost, Position, PostUpdate};

/// Validate a post title
///
/// # Errors
/// * `InvalidTitle` - title is empty or whitespace-only
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CanvasError::InvalidTitle {
            reason: "Title cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Validate post content
///
/// # Errors
/// * `InvalidContent` - content is empty or whitespace-only
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(CanvasError::InvalidContent {
            reason: "Content cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Validate canvas coordinates
///
/// Both coordinates must be finite. NaN and infinities cannot be stored in a
/// `REAL NOT NULL` column or written as JSON numbers.
///
/// # Errors
/// * `InvalidPosition` - a coordinate is NaN or infinite
pub fn validate_position(position: &Position) -> Result<()> {
    for (axis, value) in [("x", position.x), ("y", position.y)] {
        if !value.is_finite() {
            return Err(CanvasError::InvalidPosition {
                reason: format!("{} must be a finite number, got {}", axis, value),
            });
        }
    }
    Ok(())
}

/// Validate creation input; title, then content, then position
///
/// # Errors
/// * `InvalidTitle` / `InvalidContent` / `InvalidPosition`
pub fn validate_new_post(input: &NewPost) -> Result<()> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;
    validate_position(&input.resolved_position())
}

/// Validate update input; title, then content, then position
///
/// # Errors
/// * `InvalidTitle` / `InvalidContent` / `InvalidPosition`
pub fn validate_post_update(input: &PostUpdate) -> Result<()> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;
    validate_position(&input.position)
}
