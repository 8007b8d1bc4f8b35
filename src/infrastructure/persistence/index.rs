//! Paired primary map and reverse index shared by the in-memory and file
//! backends.

use std::collections::HashMap;

use crate::domain::entities::{OwnedUrl, ShortUrl};

/// Primary map (short code → record) plus reverse index
/// (original URL → short code).
///
/// The two maps are always mutated together through [`UrlIndex::insert`], so
/// every record reachable by code is also reachable by original URL. The
/// reverse index is what decides first-writer-wins before a code is ever
/// allocated. `UrlIndex` itself is not synchronized; each backend wraps it in
/// its own lock.
#[derive(Debug, Default)]
pub struct UrlIndex {
    by_code: HashMap<String, ShortUrl>,
    by_original: HashMap<String, String>,
}

impl UrlIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_code: HashMap::with_capacity(capacity),
            by_original: HashMap::with_capacity(capacity),
        }
    }

    /// The record previously stored for this original URL, if any.
    pub fn find_by_original(&self, original_url: &str) -> Option<&ShortUrl> {
        self.by_original
            .get(original_url)
            .and_then(|code| self.by_code.get(code))
    }

    pub fn find_by_code(&self, short_code: &str) -> Option<&ShortUrl> {
        self.by_code.get(short_code)
    }

    pub fn contains_code(&self, short_code: &str) -> bool {
        self.by_code.contains_key(short_code)
    }

    /// Inserts a record into both maps.
    ///
    /// Callers are expected to have checked first-writer-wins through
    /// [`UrlIndex::find_by_original`] under the same lock before inserting.
    pub fn insert(&mut self, record: ShortUrl) {
        self.by_original
            .insert(record.original_url.clone(), record.short_code.clone());
        self.by_code.insert(record.short_code.clone(), record);
    }

    /// All records belonging to one identity. Map iteration order is not
    /// guaranteed; callers must not rely on the result order.
    pub fn owned_by(&self, owner_id: &str) -> Vec<OwnedUrl> {
        self.by_code
            .values()
            .filter(|record| record.owner_id == owner_id)
            .map(|record| OwnedUrl {
                short_code: record.short_code.clone(),
                original_url: record.original_url.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(original: &str, code: &str, owner: &str) -> ShortUrl {
        ShortUrl::new(original, code, owner)
    }

    #[test]
    fn test_insert_populates_both_maps() {
        let mut index = UrlIndex::default();
        index.insert(record("https://example.com", "abc123", "user-1"));

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.find_by_code("abc123").unwrap().original_url,
            "https://example.com"
        );
        assert_eq!(
            index.find_by_original("https://example.com").unwrap().short_code,
            "abc123"
        );
    }

    #[test]
    fn test_find_by_original_misses_unknown_url() {
        let mut index = UrlIndex::default();
        index.insert(record("https://example.com", "abc123", "user-1"));

        assert!(index.find_by_original("https://other.com").is_none());
        assert!(index.find_by_code("zzz999").is_none());
    }

    #[test]
    fn test_owned_by_filters_by_identity() {
        let mut index = UrlIndex::default();
        index.insert(record("https://a.com", "aaa", "user-1"));
        index.insert(record("https://b.com", "bbb", "user-2"));
        index.insert(record("https://c.com", "ccc", "user-1"));

        let mut urls = index.owned_by("user-1");
        urls.sort();

        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].short_code, "aaa");
        assert_eq!(urls[1].short_code, "ccc");
        assert!(index.owned_by("user-3").is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = UrlIndex::with_capacity(16);
        assert!(index.is_empty());
        assert!(index.owned_by("user-1").is_empty());
    }
}
