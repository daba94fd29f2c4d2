//! Most frequent route searches, kept in a key-value store.

use std::collections::{BTreeMap, HashMap};

use crate::traits::KeyValueStore;

/// Storage key holding the JSON counter map.
pub const TOP_SEARCHES_KEY: &str = "topSearches";

/// Number of entries shown in the top-searches list.
pub const TOP_SEARCHES_LIMIT: usize = 10;

/// Search counters persisted as a JSON object of `label -> count`.
#[derive(Debug)]
pub struct SearchStats<S> {
    store: S,
}

impl<S: KeyValueStore> SearchStats<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Increments the counter for `label`, returning the new count.
    pub fn record(&mut self, label: &str) -> u64 {
        let mut counts = self.load();
        let count = counts.entry(label.to_string()).or_insert(0);
        *count += 1;
        let count = *count;

        match serde_json::to_string(&counts) {
            Ok(encoded) => self.store.set(TOP_SEARCHES_KEY, encoded),
            Err(err) => tracing::warn!(%err, "failed to encode search counters"),
        }
        count
    }

    pub fn count(&self, label: &str) -> u64 {
        self.load().get(label).copied().unwrap_or(0)
    }

    /// Up to `limit` labels, most searched first; ties by label.
    pub fn top(&self, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self.load().into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }

    fn load(&self) -> BTreeMap<String, u64> {
        let Some(raw) = self.store.get(TOP_SEARCHES_KEY) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "discarding unreadable search counters");
            BTreeMap::new()
        })
    }
}

/// Key-value store held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}
