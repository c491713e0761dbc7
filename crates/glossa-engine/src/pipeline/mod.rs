//! Search-suggestion pipeline.
//!
//! Keystrokes update the input immediately and re-arm a debounce timer.
//! When the timer fires, the term is resolved against the word cache and,
//! failing that, the backend's fuzzy search. Submits bypass the debounce
//! and produce the authoritative [`SearchResult`].
//!
//! Every keystroke and submit takes a new sequence number. A resolution is
//! applied only if its number is still the latest, so a slow response for an
//! older term can never overwrite newer state.

pub mod candidates;
pub mod debounce;
pub mod word_cache;

use crate::gateway::AuthGateway;
use crate::history::SearchHistory;
use candidates::{CandidateResolver, CandidateSource, PendingTerm, Resolution};
use debounce::Debouncer;
use glossa_common::history::RecentSearches;
use glossa_common::protocol::SearchResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error};
use word_cache::WordCache;

pub const MAX_SUGGESTIONS: usize = 5;
pub const MIN_TERM_CHARS: usize = 2;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);
pub const SEARCH_FAILED: &str = "Error searching for word. Please try again.";

/// Whether a term is long enough to compute suggestions for.
pub fn is_suggestible(term: &str) -> bool {
    term.chars().count() >= MIN_TERM_CHARS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending timer and no suggestions.
    Idle,
    /// A keystroke arrived; the debounce timer is armed.
    Typing,
    /// The latest term has been resolved.
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank term; nothing was sent.
    Ignored,
    Found,
    NotFound,
    /// The search failed; see [`SuggestionPipeline::error`].
    Failed,
}

pub struct SuggestionPipeline {
    gateway: Arc<AuthGateway>,
    words: Option<Arc<WordCache>>,
    history: SearchHistory,
    debouncer: Debouncer<PendingTerm>,
    fired_rx: mpsc::UnboundedReceiver<PendingTerm>,
    latest_seq: u64,
    input: String,
    phase: Phase,
    suggestions: Vec<String>,
    result: Option<SearchResult>,
    error: Option<String>,
}

impl SuggestionPipeline {
    pub fn new(gateway: Arc<AuthGateway>, history: SearchHistory, debounce: Duration) -> Self {
        let (debouncer, fired_rx) = Debouncer::new(debounce);
        Self {
            gateway,
            words: None,
            history,
            debouncer,
            fired_rx,
            latest_seq: 0,
            input: String::new(),
            phase: Phase::Idle,
            suggestions: Vec::new(),
            result: None,
            error: None,
        }
    }

    /// Installs a word cache directly. Ignored if one is already loaded.
    pub fn with_word_cache(mut self, words: WordCache) -> Self {
        if self.words.is_none() {
            self.words = Some(Arc::new(words));
        }
        self
    }

    /// Fetches the word cache on first call; later calls return the same cache.
    pub async fn load_word_cache(&mut self) -> Arc<WordCache> {
        if let Some(words) = &self.words {
            return Arc::clone(words);
        }
        let words = Arc::new(WordCache::load(self.gateway.backend().as_ref()).await);
        self.words = Some(Arc::clone(&words));
        words
    }

    pub fn is_loading_cache(&self) -> bool {
        self.words.is_none()
    }

    pub fn gateway(&self) -> &Arc<AuthGateway> {
        &self.gateway
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &RecentSearches {
        self.history.entries()
    }

    fn next_seq(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// A keystroke: shows `value` at once and restarts the debounce timer for it.
    pub fn on_input(&mut self, value: &str) {
        self.input = value.to_string();
        let seq = self.next_seq();
        self.debouncer.arm(PendingTerm {
            seq,
            term: value.to_string(),
        });
        self.phase = Phase::Typing;
    }

    /// Waits for the debounce timer to deliver a term.
    pub async fn next_pending(&mut self) -> Option<PendingTerm> {
        self.fired_rx.recv().await
    }

    /// A resolver over the current collaborators, usable off the pipeline
    /// (e.g. from a spawned task). Before the cache loads it resolves against
    /// an empty cache.
    pub fn resolver(&self) -> CandidateResolver {
        let words = self.words.clone().unwrap_or_default();
        CandidateResolver::new(Arc::clone(&self.gateway), words)
    }

    /// Applies a finished resolution. Returns false if a newer keystroke or
    /// submit has happened since it was issued.
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        if resolution.seq != self.latest_seq {
            debug!(
                "Discarding stale suggestions for '{}' (seq {}, latest {})",
                resolution.term, resolution.seq, self.latest_seq
            );
            return false;
        }

        self.suggestions = resolution.suggestions;
        self.phase = match resolution.source {
            CandidateSource::TooShort => Phase::Idle,
            _ => Phase::Resolved,
        };
        true
    }

    /// Resolves a delivered term if it is still current.
    pub async fn resolve_pending(&mut self, pending: PendingTerm) -> bool {
        if pending.seq != self.latest_seq {
            debug!("Skipping stale debounced term '{}'", pending.term);
            return false;
        }
        let resolution = self.resolver().resolve(pending).await;
        self.apply(resolution)
    }

    /// Waits out the debounce and resolves the latest term. Returns false
    /// without waiting when nothing is pending.
    pub async fn settle(&mut self) -> bool {
        loop {
            let pending = match self.fired_rx.try_recv() {
                Ok(pending) => pending,
                Err(_) if self.debouncer.is_armed() => match self.fired_rx.recv().await {
                    Some(pending) => pending,
                    None => return false,
                },
                Err(_) => return false,
            };
            if pending.seq == self.latest_seq {
                return self.resolve_pending(pending).await;
            }
            debug!("Dropping superseded term '{}'", pending.term);
        }
    }

    /// Runs an explicit search for `term`, bypassing the debounce.
    ///
    /// Exact matches are recorded in the history. On failure the previous
    /// result is kept and a user-facing message is set.
    pub async fn submit(&mut self, term: &str) -> SubmitOutcome {
        let term = term.trim();
        if term.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.debouncer.cancel();
        self.next_seq();
        self.suggestions.clear();
        self.phase = Phase::Idle;
        self.error = None;

        match self.gateway.search(term).await {
            Ok(result) => {
                let outcome = if result.exact_match {
                    self.history.record(&result.word, result.meaning.clone());
                    SubmitOutcome::Found
                } else {
                    SubmitOutcome::NotFound
                };
                self.result = Some(result);
                outcome
            }
            Err(e) => {
                error!("Search error: {}", e);
                self.error = Some(SEARCH_FAILED.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Submits the current input.
    pub async fn submit_input(&mut self) -> SubmitOutcome {
        let term = self.input.clone();
        self.submit(&term).await
    }

    /// Picks a suggestion: it becomes the input and is searched at once.
    pub async fn select_suggestion(&mut self, suggestion: &str) -> SubmitOutcome {
        let term = suggestion.trim();
        self.input = term.to_string();
        self.submit(term).await
    }
}
