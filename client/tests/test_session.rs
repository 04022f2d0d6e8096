//! Session context tests

use std::collections::HashSet;

use deploywatch::errors::ClientError;
use deploywatch::session::SessionContext;

#[test]
fn test_no_session_means_no_token() {
    let session = SessionContext::new();
    assert!(!session.is_authenticated());
    assert!(session.username().is_none());
    assert!(matches!(
        session.token(),
        Err(ClientError::SessionError(_))
    ));
}

#[test]
fn test_login_installs_the_session() {
    let session = SessionContext::new();
    let roles: HashSet<String> = ["ROLE_USER".to_string()].into_iter().collect();
    session.set_session("tok-123".to_string(), "alice".to_string(), roles);

    assert!(session.is_authenticated());
    assert_eq!(session.username().as_deref(), Some("alice"));
    assert_eq!(session.token().unwrap(), "tok-123");
    assert!(!session.is_admin());
}

#[test]
fn test_admin_role_is_detected() {
    let session = SessionContext::new();
    let roles: HashSet<String> = ["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]
        .into_iter()
        .collect();
    session.set_session("tok".to_string(), "root".to_string(), roles);

    assert!(session.is_admin());
}

#[test]
fn test_logout_clears_everything() {
    let session = SessionContext::new();
    session.set_session(
        "tok".to_string(),
        "alice".to_string(),
        HashSet::new(),
    );

    session.clear_session();
    assert!(!session.is_authenticated());
    assert!(session.token().is_err());
    assert!(!session.is_admin());
}
