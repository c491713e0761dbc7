use super::word_cache::WordCache;
use super::{MAX_SUGGESTIONS, is_suggestible};
use crate::gateway::AuthGateway;
use std::sync::Arc;
use tracing::warn;

/// A debounced term, tagged with the sequence number of the keystroke that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTerm {
    pub seq: u64,
    pub term: String,
}

/// Where a suggestion list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Term shorter than the minimum; nothing was computed.
    TooShort,
    WordCache,
    Backend,
    /// The backend knows the term; no suggestions needed.
    ExactMatch,
    /// The backend call failed; downgraded to no suggestions.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub seq: u64,
    pub term: String,
    pub suggestions: Vec<String>,
    pub source: CandidateSource,
}

/// Turns a term into a suggestion list: cache prefix matches first, the
/// backend's fuzzy search only when the cache has none. Never fails.
#[derive(Clone)]
pub struct CandidateResolver {
    gateway: Arc<AuthGateway>,
    words: Arc<WordCache>,
}

impl CandidateResolver {
    pub fn new(gateway: Arc<AuthGateway>, words: Arc<WordCache>) -> Self {
        Self { gateway, words }
    }

    pub async fn resolve(&self, pending: PendingTerm) -> Resolution {
        let (suggestions, source) = self.candidates(&pending.term).await;
        Resolution {
            seq: pending.seq,
            term: pending.term,
            suggestions,
            source,
        }
    }

    pub async fn candidates(&self, term: &str) -> (Vec<String>, CandidateSource) {
        if !is_suggestible(term) {
            return (Vec::new(), CandidateSource::TooShort);
        }

        let local = self.words.prefix_matches(term);
        if !local.is_empty() {
            return (local, CandidateSource::WordCache);
        }

        match self.gateway.search(term).await {
            Ok(result) if result.exact_match => (Vec::new(), CandidateSource::ExactMatch),
            Ok(mut result) => {
                result.suggestions.truncate(MAX_SUGGESTIONS);
                (result.suggestions, CandidateSource::Backend)
            }
            Err(e) => {
                warn!("Error fetching suggestions for '{}': {}", term, e);
                (Vec::new(), CandidateSource::Failed)
            }
        }
    }
}
