//! Bounded, de-duplicated list of recent exact-match searches.
//!
//! Entries are kept newest-first. Recording a word that is already present
//! moves it to the front with the new timestamp and meaning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the history.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Length of the meaning preview shown next to a recent search.
pub const MEANING_PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearchEntry {
    pub word: String,
    pub timestamp: DateTime<Utc>,
    pub is_exact_match: bool,
    #[serde(default)]
    pub meaning: Option<String>,
}

impl RecentSearchEntry {
    /// Entry for a server-confirmed exact match.
    pub fn exact(
        word: impl Into<String>,
        meaning: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            word: word.into(),
            timestamp,
            is_exact_match: true,
            meaning,
        }
    }

    /// First 60 characters of the meaning, with "..." appended when cut.
    pub fn meaning_preview(&self) -> Option<String> {
        let meaning = self.meaning.as_deref()?;
        let mut chars = meaning.chars();
        let head: String = chars.by_ref().take(MEANING_PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            Some(format!("{head}..."))
        } else {
            Some(head)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    entries: Vec<RecentSearchEntry>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from previously persisted entries, restoring the
    /// size and uniqueness bounds in case the stored data violates them.
    pub fn from_entries(entries: Vec<RecentSearchEntry>) -> Self {
        let mut restored: Vec<RecentSearchEntry> = Vec::with_capacity(MAX_RECENT_SEARCHES);
        for entry in entries {
            if restored.len() == MAX_RECENT_SEARCHES {
                break;
            }
            if !restored.iter().any(|e| e.word == entry.word) {
                restored.push(entry);
            }
        }
        Self { entries: restored }
    }

    /// Front-inserts `entry`, dropping any older entry for the same word and
    /// truncating to [`MAX_RECENT_SEARCHES`].
    pub fn record(&mut self, entry: RecentSearchEntry) {
        self.entries.retain(|e| e.word != entry.word);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn entries(&self) -> &[RecentSearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
