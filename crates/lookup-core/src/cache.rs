//! Query cache — memoised search results keyed by normalised query.
//!
//! The backing dataset never changes during a session, so entries are never
//! evicted. [`QueryCache::clear`] is only called when a dataset is replaced
//! wholesale.

use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct QueryCache<V> {
    entries: HashMap<String, Arc<V>>,
    hits: u64,
    misses: u64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self { entries: HashMap::new(), hits: 0, misses: 0 }
    }
}

impl<V> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: &str, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some(hit) = self.entries.get(key) {
            self.hits += 1;
            tracing::debug!(key, hits = self.hits, "query cache hit");
            return Arc::clone(hit);
        }
        self.misses += 1;
        let value = Arc::new(compute());
        self.entries.insert(key.to_string(), Arc::clone(&value));
        tracing::debug!(key, misses = self.misses, "query cache miss");
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
