mod common;

use common::{MockBackend, checked_gateway, unauthorized};
use glossa_engine::backend::BackendError;
use glossa_engine::gateway::{AuthGateway, LOGIN_FAILED, LOGIN_FIELDS_REQUIRED};
use glossa_engine::protocol::{SearchResult, SessionStatus};
use std::sync::Arc;

#[tokio::test]
async fn test_check_session_authenticates_returned_user() {
    let mock = Arc::new(MockBackend::authenticated("ada"));
    let gateway = AuthGateway::new(mock.clone());
    assert!(gateway.is_loading().await);

    let session = gateway.check_session().await;

    assert!(session.is_authenticated);
    assert_eq!(gateway.current_user().await.as_deref(), Some("ada"));
    assert!(!gateway.is_loading().await);
}

#[tokio::test]
async fn test_check_session_failure_ends_loading_unauthenticated() {
    let mock = Arc::new(MockBackend::new());
    mock.set_session(Err(BackendError::Transport("connection refused".into())));
    let gateway = AuthGateway::new(mock.clone());

    let session = gateway.check_session().await;

    assert!(!session.is_authenticated);
    assert!(session.user.is_none());
    assert!(!gateway.is_loading().await);
}

#[tokio::test]
async fn test_check_session_not_authenticated() {
    let mock = Arc::new(MockBackend::new());
    let gateway = checked_gateway(&mock).await;

    assert!(!gateway.is_authenticated().await);
    assert!(!gateway.is_loading().await);
}

#[tokio::test]
async fn test_login_with_empty_password_skips_network() {
    let mock = Arc::new(MockBackend::new());
    let gateway = AuthGateway::new(mock.clone());

    let outcome = gateway.login("ada", "").await;

    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some(LOGIN_FIELDS_REQUIRED));
    assert!(mock.calls().is_empty());
    assert!(!gateway.is_authenticated().await);

    let outcome = gateway.login("", "secret").await;
    assert!(!outcome.success);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_login_success_is_optimistic() {
    let mock = Arc::new(MockBackend::new());
    let gateway = checked_gateway(&mock).await;

    let outcome = gateway.login("ada", "secret").await;

    assert!(outcome.success);
    assert!(outcome.message.is_none());
    assert_eq!(gateway.current_user().await.as_deref(), Some("ada"));
    // Only the startup check validated; login did not re-validate.
    assert_eq!(mock.calls(), vec!["validate_session", "login:ada"]);
}

#[tokio::test]
async fn test_login_failure_uses_service_detail() {
    let mock = Arc::new(MockBackend::new().with_login(Err(BackendError::Unauthorized {
        detail: Some("Incorrect username or password".into()),
    })));
    let gateway = checked_gateway(&mock).await;

    let outcome = gateway.login("ada", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Incorrect username or password")
    );
    assert!(!gateway.is_authenticated().await);
}

#[tokio::test]
async fn test_login_failure_without_detail_uses_fallback() {
    let mock = Arc::new(
        MockBackend::new().with_login(Err(BackendError::Transport("timed out".into()))),
    );
    let gateway = checked_gateway(&mock).await;

    let outcome = gateway.login("ada", "secret").await;

    assert_eq!(outcome.message.as_deref(), Some(LOGIN_FAILED));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mock = Arc::new(MockBackend::authenticated("ada"));
    let gateway = checked_gateway(&mock).await;

    assert!(gateway.logout().await);
    assert!(!gateway.is_authenticated().await);
    assert!(gateway.current_user().await.is_none());
}

#[tokio::test]
async fn test_logout_failure_keeps_session() {
    let mock = Arc::new(
        MockBackend::authenticated("ada")
            .with_logout(Err(BackendError::Transport("offline".into()))),
    );
    let gateway = checked_gateway(&mock).await;

    assert!(!gateway.logout().await);
    assert!(gateway.is_authenticated().await);
}

#[tokio::test]
async fn test_search_returns_result() {
    let mock = Arc::new(
        MockBackend::authenticated("ada")
            .with_search("cat", Ok(SearchResult::exact("cat", "a small domesticated feline"))),
    );
    let gateway = checked_gateway(&mock).await;

    let result = gateway.search("cat").await.unwrap();
    assert!(result.exact_match);
}

#[tokio::test]
async fn test_search_401_with_expired_session_logs_out() {
    let mock = Arc::new(MockBackend::authenticated("ada").with_search("cat", Err(unauthorized())));
    let gateway = checked_gateway(&mock).await;
    mock.set_session(Ok(SessionStatus {
        is_authenticated: false,
        username: None,
    }));

    let err = gateway.search("cat").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!gateway.is_authenticated().await);
    assert_eq!(mock.count("validate_session"), 2);
}

#[tokio::test]
async fn test_search_401_with_valid_session_keeps_it() {
    let mock = Arc::new(MockBackend::authenticated("ada").with_search("cat", Err(unauthorized())));
    let gateway = checked_gateway(&mock).await;

    let err = gateway.search("cat").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(gateway.is_authenticated().await);
}

#[tokio::test]
async fn test_search_401_with_failed_revalidation_logs_out() {
    let mock = Arc::new(MockBackend::authenticated("ada").with_search("cat", Err(unauthorized())));
    let gateway = checked_gateway(&mock).await;
    mock.set_session(Err(BackendError::Transport("offline".into())));

    assert!(gateway.search("cat").await.is_err());
    assert!(!gateway.is_authenticated().await);
}

#[tokio::test]
async fn test_search_other_errors_leave_session_alone() {
    let mock = Arc::new(MockBackend::authenticated("ada").with_search(
        "cat",
        Err(BackendError::Status {
            status: 500,
            detail: Some("boom".into()),
        }),
    ));
    let gateway = checked_gateway(&mock).await;

    let err = gateway.search("cat").await.unwrap_err();

    assert_eq!(err.detail(), Some("boom"));
    assert!(gateway.is_authenticated().await);
    assert_eq!(mock.count("validate_session"), 1);
}
