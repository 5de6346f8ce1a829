use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CachedDocument {
    pub value: Value,
    pub fetched_at: Instant,
    pub revalidate: Duration,
}

impl CachedDocument {
    pub fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.revalidate
    }
}

/// Time-based response cache keyed by URL.
///
/// An entry is served until its revalidation window elapses; nothing
/// invalidates it earlier. When full, the oldest entry is evicted.
#[derive(Debug)]
pub struct RevalidationCache {
    max_entries: usize,
    entries: HashMap<String, CachedDocument>,
}

impl RevalidationCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, url: &str) -> Option<Value> {
        self.entries.retain(|_, doc| doc.is_fresh());
        self.entries.get(url).map(|doc| doc.value.clone())
    }

    pub fn insert(&mut self, url: String, value: Value, revalidate: Duration) {
        if revalidate.is_zero() || self.max_entries == 0 {
            return;
        }
        self.entries.retain(|_, doc| doc.is_fresh());
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&url) {
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, doc)| doc.fetched_at)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(
            url,
            CachedDocument {
                value,
                fetched_at: Instant::now(),
                revalidate,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RevalidationCache {
    fn default() -> Self {
        Self::new(64)
    }
}
