//! Session/auth gateway.
//!
//! Wraps the session calls and the search call of a [`DictionaryBackend`] and
//! owns the single authoritative [`Session`]. Consumers share the gateway
//! through an `Arc` and read the session through it; only the gateway mutates it.

use crate::backend::{BackendError, DictionaryBackend};
use glossa_common::protocol::{SearchResult, Session};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

pub const LOGIN_FIELDS_REQUIRED: &str = "Please enter both username and password";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Result of a login attempt. Login failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl LoginOutcome {
    fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug)]
struct GatewayState {
    session: Session,
    loading: bool,
}

pub struct AuthGateway {
    backend: Arc<dyn DictionaryBackend>,
    state: RwLock<GatewayState>,
}

impl AuthGateway {
    /// Creates a gateway in the loading state with no session.
    pub fn new(backend: Arc<dyn DictionaryBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(GatewayState {
                session: Session::default(),
                loading: true,
            }),
        }
    }

    pub fn backend(&self) -> &Arc<dyn DictionaryBackend> {
        &self.backend
    }

    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_authenticated
    }

    pub async fn current_user(&self) -> Option<String> {
        self.state.read().await.session.username().map(str::to_string)
    }

    /// True until the startup [`check_session`](Self::check_session) has completed.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    async fn set_session(&self, session: Session) {
        self.state.write().await.session = session;
    }

    async fn clear_session(&self) {
        self.set_session(Session::default()).await;
    }

    /// Validates the ambient session credential. Any failure leaves the
    /// client unauthenticated. Always ends the loading state.
    pub async fn check_session(&self) -> Session {
        let session = match self.backend.validate_session().await {
            Ok(status) if status.is_authenticated => {
                Session::authenticated(status.username.unwrap_or_default())
            }
            Ok(_) => Session::default(),
            Err(e) => {
                warn!("Authentication check failed: {}", e);
                Session::default()
            }
        };

        let mut state = self.state.write().await;
        state.session = session.clone();
        state.loading = false;
        session
    }

    /// Exchanges credentials for a session cookie. On success the session is
    /// marked authenticated with the submitted username without a second
    /// validation round trip.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        if username.is_empty() || password.is_empty() {
            return LoginOutcome::failed(LOGIN_FIELDS_REQUIRED);
        }

        match self.backend.login(username, password).await {
            Ok(()) => {
                info!("Logged in as {}", username);
                self.set_session(Session::authenticated(username)).await;
                LoginOutcome::succeeded()
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                LoginOutcome::failed(e.detail().unwrap_or(LOGIN_FAILED))
            }
        }
    }

    /// Ends the session. A failed call leaves the session untouched and returns false.
    pub async fn logout(&self) -> bool {
        match self.backend.logout().await {
            Ok(()) => {
                self.clear_session().await;
                true
            }
            Err(e) => {
                error!("Logout failed: {}", e);
                false
            }
        }
    }

    /// Looks up `word`. Errors are always returned to the caller; a 401 first
    /// triggers one session re-validation, which clears the session unless the
    /// service still reports it authenticated.
    pub async fn search(&self, word: &str) -> Result<SearchResult, BackendError> {
        let err = match self.backend.search(word).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };
        warn!("Search failed: {}", err);

        if err.is_unauthorized() {
            info!("Authentication error during search, verifying session...");
            match self.backend.validate_session().await {
                Ok(status) if status.is_authenticated => {}
                Ok(_) => self.clear_session().await,
                Err(check) => {
                    error!("Session verification failed, logging out: {}", check);
                    self.clear_session().await;
                }
            }
        }

        Err(err)
    }
}
