//! Short URL record and related value types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted short URL record.
///
/// Once created a record is immutable: there is no update or delete path.
/// The serde field names match the file backend's on-disk layout, one JSON
/// object per line: `{"uuid", "short_url", "original_url", "user_id"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrl {
    /// Unique identifier assigned at creation, never reused.
    #[serde(rename = "uuid")]
    pub id: Uuid,

    /// URL-safe token, unique across the store; primary lookup key.
    #[serde(rename = "short_url")]
    pub short_code: String,

    /// The long URL supplied by the caller; unique across the store.
    pub original_url: String,

    /// Opaque per-browser identity. Many records share one owner.
    #[serde(rename = "user_id", default)]
    pub owner_id: String,
}

impl ShortUrl {
    /// Creates a record with a freshly assigned id.
    pub fn new(
        original_url: impl Into<String>,
        short_code: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            short_code: short_code.into(),
            original_url: original_url.into(),
            owner_id: owner_id.into(),
        }
    }
}

/// One entry of a batch save request, correlated by a caller-supplied id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub correlation_id: String,
    pub original_url: String,
}

/// One entry of a batch save response. Results are returned in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub correlation_id: String,
    pub short_code: String,
}

/// A (short code, original URL) pair belonging to one identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OwnedUrl {
    pub short_code: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_distinct_ids() {
        let a = ShortUrl::new("https://example.com", "abc123", "user-1");
        let b = ShortUrl::new("https://example.org", "def456", "user-1");

        assert_ne!(a.id, b.id);
        assert_eq!(a.short_code, "abc123");
        assert_eq!(a.original_url, "https://example.com");
        assert_eq!(a.owner_id, "user-1");
    }

    #[test]
    fn test_serialized_layout_matches_file_format() {
        let record = ShortUrl::new("https://example.com", "abc123", "user-1");
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("uuid").is_some());
        assert_eq!(value["short_url"], "abc123");
        assert_eq!(value["original_url"], "https://example.com");
        assert_eq!(value["user_id"], "user-1");
    }

    #[test]
    fn test_deserializes_file_line() {
        let line = r#"{"uuid":"2f7c54a2-9c2b-4f6e-8a0f-0a4f3f1c9d6e","short_url":"abc123","original_url":"https://example.com","user_id":"user-1"}"#;
        let record: ShortUrl = serde_json::from_str(line).unwrap();

        assert_eq!(record.short_code, "abc123");
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.owner_id, "user-1");
    }

    #[test]
    fn test_missing_user_id_defaults_to_empty() {
        // Lines written before identity partitioning existed carry no user_id.
        let line = r#"{"uuid":"2f7c54a2-9c2b-4f6e-8a0f-0a4f3f1c9d6e","short_url":"abc123","original_url":"https://example.com"}"#;
        let record: ShortUrl = serde_json::from_str(line).unwrap();

        assert_eq!(record.owner_id, "");
    }
}
