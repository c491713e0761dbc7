use super::{MAX_SUGGESTIONS, is_suggestible};
use crate::backend::DictionaryBackend;
use tracing::{info, warn};

/// Headwords fetched once at startup for client-side prefix matching.
/// An empty cache is valid and means every lookup goes to the backend.
#[derive(Debug, Clone, Default)]
pub struct WordCache {
    words: Vec<String>,
}

impl WordCache {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Fetches the word list. A failed fetch yields an empty cache.
    pub async fn load(backend: &dyn DictionaryBackend) -> Self {
        match backend.dictionary_words().await {
            Ok(words) => {
                info!("Loaded {} dictionary words", words.len());
                Self::new(words)
            }
            Err(e) => {
                warn!("Failed to load dictionary words cache: {}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive prefix matches in cache order, at most [`MAX_SUGGESTIONS`].
    pub fn prefix_matches(&self, term: &str) -> Vec<String> {
        if !is_suggestible(term) || self.words.is_empty() {
            return Vec::new();
        }

        let prefix = term.to_lowercase();
        self.words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&prefix))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}
