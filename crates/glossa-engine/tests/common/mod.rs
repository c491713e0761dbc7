#![allow(dead_code)]

use async_trait::async_trait;
use glossa_engine::backend::{BackendError, DictionaryBackend};
use glossa_engine::gateway::AuthGateway;
use glossa_engine::protocol::{SearchResult, SessionStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted backend that records every call as `"name"` or `"name:arg"`.
pub struct MockBackend {
    session: Mutex<Result<SessionStatus, BackendError>>,
    login: Mutex<Result<(), BackendError>>,
    logout: Mutex<Result<(), BackendError>>,
    words: Mutex<Result<Vec<String>, BackendError>>,
    searches: Mutex<HashMap<String, Result<SearchResult, BackendError>>>,
    calls: Mutex<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            session: Mutex::new(Ok(SessionStatus {
                is_authenticated: false,
                username: None,
            })),
            login: Mutex::new(Ok(())),
            logout: Mutex::new(Ok(())),
            words: Mutex::new(Ok(Vec::new())),
            searches: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(username: &str) -> Self {
        let mock = Self::default();
        mock.set_session(Ok(SessionStatus {
            is_authenticated: true,
            username: Some(username.to_string()),
        }));
        mock
    }

    pub fn with_words(self, words: &[&str]) -> Self {
        *self.words.lock().unwrap() = Ok(words.iter().map(|w| w.to_string()).collect());
        self
    }

    pub fn with_words_error(self, err: BackendError) -> Self {
        *self.words.lock().unwrap() = Err(err);
        self
    }

    pub fn with_search(self, word: &str, result: Result<SearchResult, BackendError>) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(word.to_string(), result);
        self
    }

    pub fn with_login(self, result: Result<(), BackendError>) -> Self {
        *self.login.lock().unwrap() = result;
        self
    }

    pub fn with_logout(self, result: Result<(), BackendError>) -> Self {
        *self.logout.lock().unwrap() = result;
        self
    }

    pub fn set_session(&self, status: Result<SessionStatus, BackendError>) {
        *self.session.lock().unwrap() = status;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.as_str() == name || c.starts_with(&format!("{name}:")))
            .count()
    }

    pub fn searched(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.strip_prefix("search:").map(str::to_string))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DictionaryBackend for MockBackend {
    async fn validate_session(&self) -> Result<SessionStatus, BackendError> {
        self.record("validate_session".into());
        self.session.lock().unwrap().clone()
    }

    async fn login(&self, username: &str, _password: &str) -> Result<(), BackendError> {
        self.record(format!("login:{username}"));
        self.login.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<(), BackendError> {
        self.record("logout".into());
        self.logout.lock().unwrap().clone()
    }

    async fn search(&self, word: &str) -> Result<SearchResult, BackendError> {
        self.record(format!("search:{word}"));
        self.searches
            .lock()
            .unwrap()
            .get(word)
            .cloned()
            .unwrap_or_else(|| Ok(SearchResult::fuzzy(word, vec![])))
    }

    async fn dictionary_words(&self) -> Result<Vec<String>, BackendError> {
        self.record("dictionary_words".into());
        self.words.lock().unwrap().clone()
    }
}

pub fn unauthorized() -> BackendError {
    BackendError::Unauthorized { detail: None }
}

/// Gateway over `mock` with the startup session check already done.
pub async fn checked_gateway(mock: &Arc<MockBackend>) -> Arc<AuthGateway> {
    let gateway = Arc::new(AuthGateway::new(mock.clone()));
    gateway.check_session().await;
    gateway
}
