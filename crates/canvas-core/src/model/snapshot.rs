use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::post::Post;
use crate::errors::Result;

/// Snapshot - a versioned capture of a whole board
///
/// `version` is chosen by the caller and is neither unique nor ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: i64,
    pub version: i64,
    pub captured_at: DateTime<Utc>,
    /// Posts in the order they were saved
    #[serde(alias = "snapshot_data")]
    pub posts: Vec<Post>,
}

/// Serialize a post sequence into the stored payload text
///
/// # Errors
/// * `Serialization` - a post could not be encoded
pub fn encode_payload(posts: &[Post]) -> Result<String> {
    Ok(serde_json::to_string(posts)?)
}

/// Decode a stored payload back into the saved post sequence
///
/// # Errors
/// * `Serialization` - payload is not a JSON array of posts
pub fn decode_payload(payload: &str) -> Result<Vec<Post>> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CanvasError;
    use crate::model::{Attributes, Position};
    use chrono::TimeZone;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            owner: "guest".into(),
            title: title.into(),
            content: "body".into(),
            position: Position::new(id as f64 * 0.1, -2.75),
            attributes: Attributes::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_789),
        }
    }

    #[test]
    fn test_payload_preserves_order_and_fields() {
        let posts = vec![post(3, "c"), post(1, "a"), post(2, "b")];
        let decoded = decode_payload(&encode_payload(&posts).unwrap()).unwrap();
        assert_eq!(decoded, posts);
    }

    #[test]
    fn test_garbage_payload_is_serialization_error() {
        let err = decode_payload("{not json").unwrap_err();
        assert!(matches!(err, CanvasError::Serialization { .. }));
    }

    #[test]
    fn test_empty_board_payload() {
        assert_eq!(encode_payload(&[]).unwrap(), "[]");
        assert!(decode_payload("[]").unwrap().is_empty());
    }
}
