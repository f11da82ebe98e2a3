// SPDX-License-Identifier: MIT

//! Account routes: signup, login, logout, session state.
//!
//! These are thin adapters over the session manager; every failure
//! comes back as a structured JSON error, and the session's
//! `last_error` mirrors what the login/signup forms display.

use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::services::SessionPhase;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 39, message = "username must be 1-39 characters"))]
    pub username: String,
    // Matches the signup form's client-side minimum.
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "display name is required"))]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session state as reported to the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub phase: SessionPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionResponse {
    async fn current(state: &AppState) -> Self {
        let snapshot = state.session.snapshot().await;
        Self {
            phase: snapshot.phase,
            profile: snapshot.profile,
            error: snapshot.last_error,
        }
    }
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SessionResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state
        .session
        .signup(
            &payload.username,
            &payload.password,
            &payload.display_name,
            &payload.bio,
        )
        .await?;

    Ok(Json(SessionResponse::current(&state).await))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    state
        .session
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(SessionResponse::current(&state).await))
}

async fn logout(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    state.session.logout().await;
    Json(SessionResponse {
        phase: SessionPhase::SignedOut,
        profile: None,
        error: None,
    })
}

async fn session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(SessionResponse::current(&state).await)
}
