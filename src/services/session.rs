// SPDX-License-Identifier: MIT

//! Account session state machine.
//!
//! Holds the single signed-in identity for this process and composes
//! the credential service with the document store. Every operation
//! reports failure as a value; the store's compare-and-swap is the
//! actual guard against concurrent writers, the session only keeps
//! the in-memory view consistent.
//!
//! Two locks with distinct jobs:
//! - `op_lock` serializes the mutating operations end to end, so two
//!   in-flight saves cannot interleave their commits. The original
//!   system performed no such exclusion and relied on the store
//!   alone; this is a hardening addition (see DESIGN.md).
//! - `state` guards the in-memory session fields and is only ever
//!   held for short, non-I/O critical sections. `snapshot()` takes
//!   it alone, so reads never wait on an in-flight network call and
//!   the transient `Authenticating`/`Saving` phases are observable.
//!
//! `logout` takes only the state lock: it stays unconditional and
//! immediate even while a save is in flight. An operation whose I/O
//! completes after a logout reports its result to its caller but does
//! not re-apply it to the cleared session.

use crate::db::{DocumentStore, Revision, StoreError};
use crate::models::{HealthMetricsInput, UserAuth, UserProfile, UserRecord};
use crate::services::credentials::{self, CredentialError};
use crate::time_utils;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Failures surfaced by session operations. All are values; only a
/// contract violation by the caller (e.g. updating metrics while
/// signed out) is the caller's bug, and even that is reported as
/// `NotSignedIn` rather than a panic.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Username already exists")]
    AlreadyExists,

    #[error("Profile was modified elsewhere; reload before saving")]
    Conflict,

    #[error("Backend error: {0}")]
    Transport(String),

    #[error("Account storage is not configured")]
    StoreUnavailable,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => SessionError::Conflict,
            StoreError::AlreadyExists => SessionError::AlreadyExists,
            StoreError::Unavailable => SessionError::StoreUnavailable,
            StoreError::Decode(detail) => {
                SessionError::Transport(format!("undecodable document: {}", detail))
            }
            StoreError::Transport(detail) => SessionError::Transport(detail),
        }
    }
}

impl From<CredentialError> for SessionError {
    fn from(err: CredentialError) -> Self {
        SessionError::Internal(err.to_string())
    }
}

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    SignedOut,
    Authenticating,
    SignedIn,
    Saving,
}

/// Read-only view of the session for the HTTP layer and tests.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub profile: Option<UserProfile>,
    pub revision: Option<Revision>,
    pub last_error: Option<String>,
}

#[derive(Default)]
struct SessionState {
    phase: SessionPhase,
    user: Option<UserRecord>,
    revision: Option<Revision>,
    last_error: Option<String>,
}

impl SessionState {
    fn sign_in(&mut self, user: UserRecord, revision: Revision) {
        self.user = Some(user);
        self.revision = Some(revision);
        self.phase = SessionPhase::SignedIn;
    }

    fn sign_out_with_error(&mut self, err: &SessionError) {
        self.user = None;
        self.revision = None;
        self.phase = SessionPhase::SignedOut;
        self.last_error = Some(err.to_string());
    }
}

/// The session manager: one signed-in identity per process.
pub struct SessionManager {
    store: Arc<dyn DocumentStore>,
    /// Serializes mutating operations; never held by `snapshot`.
    op_lock: Mutex<()>,
    state: Mutex<SessionState>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            op_lock: Mutex::new(()),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Current session state. Never waits on in-flight store I/O.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            phase: state.phase,
            profile: state.user.as_ref().map(|u| u.profile.clone()),
            revision: state.revision.clone(),
            last_error: state.last_error.clone(),
        }
    }

    /// Sign in an existing user.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let _guard = self.op_lock.lock().await;
        {
            let mut state = self.state.lock().await;
            state.phase = SessionPhase::Authenticating;
            state.last_error = None;
        }

        let result = self.authenticate(username, password).await;

        let mut state = self.state.lock().await;
        if state.phase != SessionPhase::Authenticating {
            // A logout landed while we were talking to the store; it
            // wins. Report the outcome without touching the session.
            return result.map(|_| ());
        }
        match result {
            Ok((user, revision)) => {
                tracing::info!(username, "login succeeded");
                state.sign_in(user, revision);
                Ok(())
            }
            Err(err) => {
                state.sign_out_with_error(&err);
                Err(err)
            }
        }
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, Revision), SessionError> {
        let (document, revision) = self
            .store
            .get(username)
            .await?
            .ok_or(SessionError::UserNotFound)?;

        let user: UserRecord = serde_json::from_value(document)
            .map_err(|e| SessionError::Transport(format!("malformed user document: {}", e)))?;

        if !credentials::verify_password(password, &user.auth.password_hash, &user.auth.salt) {
            return Err(SessionError::InvalidCredentials);
        }

        Ok((user, revision))
    }

    /// Create a new account and sign it in.
    ///
    /// Checks for an existing username first; the create-path write is
    /// still race-safe because the store rejects a create against an
    /// existing key, which surfaces here as `AlreadyExists` too.
    /// Any failure leaves the session fully signed out, even when a
    /// user was signed in before the attempt.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
        bio: &str,
    ) -> Result<(), SessionError> {
        let _guard = self.op_lock.lock().await;
        {
            let mut state = self.state.lock().await;
            state.phase = SessionPhase::Authenticating;
            state.last_error = None;
        }

        let result = self
            .create_account(username, password, display_name, bio)
            .await;

        let mut state = self.state.lock().await;
        if state.phase != SessionPhase::Authenticating {
            return result.map(|_| ());
        }
        match result {
            Ok((user, revision)) => {
                tracing::info!(username, "account created");
                state.sign_in(user, revision);
                Ok(())
            }
            Err(err) => {
                state.sign_out_with_error(&err);
                Err(err)
            }
        }
    }

    async fn create_account(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
        bio: &str,
    ) -> Result<(UserRecord, Revision), SessionError> {
        if self.store.get(username).await?.is_some() {
            return Err(SessionError::AlreadyExists);
        }

        let salt = credentials::generate_salt()?;
        let password_hash = credentials::hash_password(password, &salt)?;
        let now = time_utils::now_rfc3339();

        let user = UserRecord {
            auth: UserAuth {
                username: username.to_string(),
                salt,
                password_hash,
            },
            profile: UserProfile {
                username: username.to_string(),
                display_name: display_name.to_string(),
                bio: bio.to_string(),
                joined_at: now.clone(),
                updated_at: now,
                metrics: HealthMetricsInput::default(),
            },
        };

        let document =
            serde_json::to_value(&user).map_err(|e| SessionError::Internal(e.to_string()))?;
        let revision = self.store.put(username, &document, None).await?;

        Ok((user, revision))
    }

    /// Clear the session. No network call; never fails and never
    /// waits on in-flight store I/O.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.user = None;
        state.revision = None;
        state.last_error = None;
        state.phase = SessionPhase::SignedOut;
    }

    /// Persist new metrics for the signed-in user.
    ///
    /// On conflict or transport failure the in-memory user and
    /// revision are left untouched (the caller keeps the stale
    /// revision) and no retry is performed; the caller must re-read
    /// before trying again. The session stays readable while the
    /// write is in flight.
    pub async fn update_metrics(&self, metrics: HealthMetricsInput) -> Result<(), SessionError> {
        let _guard = self.op_lock.lock().await;

        let (updated, document, revision) = {
            let mut state = self.state.lock().await;
            let (user, revision) = match (&state.user, &state.revision) {
                (Some(user), Some(revision)) => (user.clone(), revision.clone()),
                _ => return Err(SessionError::NotSignedIn),
            };

            let mut updated = user;
            updated.profile.updated_at = time_utils::now_rfc3339();
            updated.profile.metrics = metrics;
            let document = serde_json::to_value(&updated)
                .map_err(|e| SessionError::Internal(e.to_string()))?;

            // Only mark the save once nothing but the store call can
            // fail; the phase is reset when the call completes.
            state.phase = SessionPhase::Saving;
            (updated, document, revision)
        };

        let result = self
            .store
            .put(&updated.auth.username, &document, Some(&revision))
            .await;

        let mut state = self.state.lock().await;
        if state.phase != SessionPhase::Saving {
            // Logged out mid-save; do not resurrect the session.
            return result.map(|_| ()).map_err(SessionError::from);
        }
        state.phase = SessionPhase::SignedIn;

        match result {
            Ok(new_revision) => {
                state.user = Some(updated);
                state.revision = Some(new_revision);
                Ok(())
            }
            Err(err) => {
                let err = SessionError::from(err);
                tracing::warn!(error = %err, "metrics save failed");
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
