//! Generic concurrent map from session token to a cached value.

use dashmap::DashMap;
use tracing::debug;

/// An unbounded concurrent map keyed by opaque session token.
///
/// No TTL is managed here; entries live until explicitly removed. `put`,
/// `get` and `remove` are safe to call concurrently from any number of
/// tasks. The scan operations act on the set of keys present when the scan
/// starts: entries inserted while a scan-and-remove is in flight are never
/// touched by it.
#[derive(Debug)]
pub struct TokenCache<V> {
    entries: DashMap<String, V>,
}

impl<V> TokenCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or overwrite the value for a token.
    pub fn put(&self, token: impl Into<String>, value: V) {
        self.entries.insert(token.into(), value);
    }

    /// Get a clone of the value for a token, if present.
    pub fn get(&self, token: &str) -> Option<V> {
        self.entries.get(token).map(|entry| entry.value().clone())
    }

    /// Whether a token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Remove the entry for a token, returning it if it was present.
    ///
    /// Removing an absent token is a no-op.
    pub fn remove(&self, token: &str) -> Option<V> {
        self.entries.remove(token).map(|(_, value)| value)
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect the tokens whose values match the predicate.
    ///
    /// This is a snapshot of matching keys at scan start. O(n) over live
    /// entries; acceptable at interactive-admin session counts.
    pub fn tokens_where(&self, pred: impl Fn(&V) -> bool) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Remove every entry whose value matches the predicate.
    ///
    /// The matching keys are collected first and then removed one by one,
    /// so the removal acts on the keys present at scan start; entries
    /// inserted after the scan began are unaffected. Returns how many
    /// entries were removed.
    pub fn remove_where(&self, pred: impl Fn(&V) -> bool) -> usize {
        let tokens = self.tokens_where(pred);
        let mut removed = 0;
        for token in &tokens {
            if self.entries.remove(token).is_some() {
                removed += 1;
            }
        }
        debug!(removed, "removed matching cache entries");
        removed
    }
}

impl<V> Default for TokenCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_put_get_remove() {
        let cache = TokenCache::new();
        cache.put("t1", 1u32);
        assert_eq!(cache.get("t1"), Some(1));
        assert_eq!(cache.remove("t1"), Some(1));
        assert_eq!(cache.get("t1"), None);
        // Removing an absent token is a no-op.
        assert_eq!(cache.remove("t1"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = TokenCache::new();
        cache.put("t1", 1u32);
        cache.put("t1", 2u32);
        assert_eq!(cache.get("t1"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_where_only_matching() {
        let cache = TokenCache::new();
        cache.put("t1", 10u32);
        cache.put("t2", 20u32);
        cache.put("t3", 10u32);

        let removed = cache.remove_where(|v| *v == 10);

        assert_eq!(removed, 2);
        assert_eq!(cache.get("t2"), Some(20));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_tokens_where_snapshot() {
        let cache = TokenCache::new();
        cache.put("t1", 1u32);
        cache.put("t2", 2u32);

        let mut tokens = cache.tokens_where(|v| *v < 10);
        tokens.sort();
        assert_eq!(tokens, vec!["t1".to_string(), "t2".to_string()]);
    }

    #[test]
    fn test_clear() {
        let cache = TokenCache::new();
        cache.put("t1", 1u32);
        cache.put("t2", 2u32);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_put_and_scan() {
        let cache = Arc::new(TokenCache::new());
        let writer = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..500u32 {
                    cache.put(format!("w{i}"), i);
                }
            })
        };
        let scanner = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    cache.remove_where(|v| v % 2 == 0);
                }
            })
        };
        writer.join().unwrap();
        scanner.join().unwrap();

        // Whatever interleaving happened, every surviving entry is odd.
        let survivors = cache.tokens_where(|v| v % 2 == 0);
        cache.remove_where(|v| v % 2 == 0);
        assert!(survivors.len() <= 500);
        assert!(cache.tokens_where(|v| v % 2 == 0).is_empty());
    }
}
