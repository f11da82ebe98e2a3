// SPDX-License-Identifier: MIT

//! Behavior with no store configuration: every operation returns a
//! failure value, nothing panics, and the app still serves requests.

use std::sync::Arc;
use vitals_tracker::db::GitHubStore;
use vitals_tracker::models::HealthMetricsInput;
use vitals_tracker::services::{SessionError, SessionManager, SessionPhase};

fn disabled_session() -> SessionManager {
    SessionManager::new(Arc::new(GitHubStore::disabled()))
}

#[tokio::test]
async fn test_all_operations_return_unavailable() {
    let session = disabled_session();

    // Repeated calls: each returns a value, none raises. The
    // disabled-store warning is emitted at most once per process
    // (guarded by a Once), regardless of how many calls land here.
    for _ in 0..3 {
        let err = session.login("alice", "secret123").await.unwrap_err();
        assert!(matches!(err, SessionError::StoreUnavailable));

        let err = session
            .signup("alice", "secret123", "Alice", "")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::StoreUnavailable));
    }

    let err = session
        .update_metrics(HealthMetricsInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotSignedIn));

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::SignedOut);
    assert_eq!(
        snapshot.last_error.as_deref(),
        Some("Account storage is not configured")
    );
}

#[tokio::test]
async fn test_logout_still_works_when_disabled() {
    let session = disabled_session();
    let _ = session.login("alice", "pw").await;
    session.logout().await;

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::SignedOut);
    assert!(snapshot.last_error.is_none());
}
