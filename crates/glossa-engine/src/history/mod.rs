//! Persisted recent-search history.

pub mod store;

use chrono::{DateTime, Utc};
use glossa_common::history::{RecentSearchEntry, RecentSearches};
use store::{KeyValueStore, MemoryStore};
use tracing::warn;

/// Storage key used when none is configured.
pub const DEFAULT_HISTORY_KEY: &str = "recentSearches";

/// Recent searches backed by a [`KeyValueStore`]. Loaded once, rewritten
/// after every change.
pub struct SearchHistory {
    store: Box<dyn KeyValueStore>,
    key: String,
    entries: RecentSearches,
}

impl SearchHistory {
    /// Reads the stored sequence. Missing or unreadable data yields an empty history.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<RecentSearchEntry>>(&raw) {
                Ok(entries) => RecentSearches::from_entries(entries),
                Err(e) => {
                    warn!("Error parsing recent searches: {}", e);
                    RecentSearches::new()
                }
            },
            Ok(None) => RecentSearches::new(),
            Err(e) => {
                warn!("Error reading recent searches: {}", e);
                RecentSearches::new()
            }
        };

        Self {
            store,
            key,
            entries,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()), DEFAULT_HISTORY_KEY)
    }

    pub fn entries(&self) -> &RecentSearches {
        &self.entries
    }

    /// Records an exact match now and persists the history.
    pub fn record(&mut self, word: &str, meaning: Option<String>) {
        self.record_at(word, meaning, Utc::now());
    }

    pub fn record_at(&mut self, word: &str, meaning: Option<String>, timestamp: DateTime<Utc>) {
        self.entries
            .record(RecentSearchEntry::exact(word, meaning, timestamp));
        self.persist();
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize recent searches: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &raw) {
            warn!("Failed to save recent searches: {}", e);
        }
    }
}
