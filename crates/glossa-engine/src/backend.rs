use async_trait::async_trait;
pub use glossa_common::error::backend_error::BackendError;
use glossa_common::protocol::{SearchResult, SessionStatus};

/// The Backend trait is the interface to the remote dictionary and session service.
///
/// Implementations carry the ambient session credential themselves (a cookie
/// jar for [`crate::http::HttpBackend`]), so none of the calls take a token.
#[async_trait]
pub trait DictionaryBackend: Send + Sync {
    /// `GET /validate-session`
    async fn validate_session(&self) -> Result<SessionStatus, BackendError>;

    /// `POST /token` with form-encoded credentials.
    async fn login(&self, username: &str, password: &str) -> Result<(), BackendError>;

    /// `POST /logout`
    async fn logout(&self) -> Result<(), BackendError>;

    /// `POST /search` with `{"word": ...}`. Returns [`BackendError::Unauthorized`] on HTTP 401.
    async fn search(&self, word: &str) -> Result<SearchResult, BackendError>;

    /// `GET /dictionary-words`, the headword list used for client-side prefix matching.
    async fn dictionary_words(&self) -> Result<Vec<String>, BackendError> {
        Err(BackendError::NotSupported("dictionary_words".into()))
    }
}
