//! LRU Tracker Module
//!
//! Keeps keys in insertion order and picks the least recently accessed one
//! for capacity eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks key order for LRU eviction.
///
/// Keys are stored in a VecDeque in insertion order:
/// - Front = oldest insertion
/// - Back = newest insertion
///
/// Reads never reorder keys. Recency lives on the entries themselves
/// (`last_accessed`), and insertion order only breaks ties.
///
/// Removal and victim selection are O(n) scans over the deque.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Insert ==
    /// Appends a newly stored key. Callers only insert keys not yet tracked;
    /// an overwrite keeps its original position.
    pub fn insert(&mut self, key: &str) {
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Least Recent ==
    /// Returns the key with the smallest recency stamp.
    ///
    /// `last_accessed` maps a key to its stamp. Among equal stamps the
    /// earliest inserted key wins. Returns None if the tracker is empty.
    pub fn least_recent<F>(&self, last_accessed: F) -> Option<&str>
    where
        F: Fn(&str) -> u64,
    {
        // min_by_key keeps the first of several equal minimums
        self.order
            .iter()
            .min_by_key(|key| last_accessed(key.as_str()))
            .map(String::as_str)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn stamps(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, t)| (k.to_string(), *t)).collect()
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.least_recent(|_| 0), None);
    }

    #[test]
    fn test_least_recent_by_stamp() {
        let mut lru = LruTracker::new();
        lru.insert("a");
        lru.insert("b");
        lru.insert("c");

        let times = stamps(&[("a", 30), ("b", 10), ("c", 20)]);
        assert_eq!(lru.least_recent(|k| times[k]), Some("b"));
    }

    #[test]
    fn test_least_recent_ties_use_insertion_order() {
        let mut lru = LruTracker::new();
        lru.insert("x");
        lru.insert("y");
        lru.insert("z");

        assert_eq!(lru.least_recent(|_| 7), Some("x"));
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();
        lru.insert("key1");
        lru.insert("key2");
        lru.insert("key3");

        lru.remove("key2");

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains("key2"));
        assert!(lru.contains("key1"));
        assert!(lru.contains("key3"));
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = LruTracker::new();
        lru.insert("key1");

        lru.remove("nonexistent");

        assert_eq!(lru.len(), 1);
        assert!(lru.contains("key1"));
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruTracker::new();
        lru.insert("a");
        lru.insert("b");

        lru.clear();

        assert!(lru.is_empty());
    }
}
