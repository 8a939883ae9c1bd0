//! Timestamp storage format
//!
//! Timestamps are stored as INTEGER milliseconds since the Unix epoch. Values
//! handed back to callers are truncated to the same precision so a record
//! returned from a write equals the record read back later.

use chrono::{DateTime, Utc};

use crate::errors::{storage_corrupt, Result};

/// Current time truncated to millisecond precision
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Convert to the stored representation
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Convert a stored value back into a timestamp
///
/// # Errors
/// * `StorageCorrupt` - value is outside the representable range
pub fn from_millis(ms: i64, entity_id: impl Into<String>) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| {
        storage_corrupt(
            "decode_timestamp",
            entity_id,
            &format!("timestamp out of range: {}", ms),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_whole_milliseconds() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(from_millis(to_millis(now), "t").unwrap(), now);
    }

    #[test]
    fn test_out_of_range_is_corrupt() {
        let err = from_millis(i64::MAX, "post:1").unwrap_err();
        assert_eq!(err.kind(), canvas_core::ExErrorKind::StorageCorrupt);
        assert_eq!(err.entity_id(), Some("post:1"));
    }
}
