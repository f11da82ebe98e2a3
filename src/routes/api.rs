// SPDX-License-Identifier: MIT

//! Profile and metrics routes for the signed-in user.

use crate::error::{AppError, Result};
use crate::models::{HealthMetricsInput, UserProfile};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/metrics", put(put_metrics))
}

/// Current profile; 401 when no user is signed in.
async fn get_profile(State(state): State<Arc<AppState>>) -> Result<Json<UserProfile>> {
    let snapshot = state.session.snapshot().await;
    snapshot.profile.map(Json).ok_or(AppError::Unauthorized)
}

/// Persist a new metrics payload for the signed-in user.
///
/// The payload is opaque to this layer: it is stored verbatim and
/// returned unmodified on the next read.
async fn put_metrics(
    State(state): State<Arc<AppState>>,
    Json(metrics): Json<HealthMetricsInput>,
) -> Result<Json<UserProfile>> {
    state.session.update_metrics(metrics).await?;

    let snapshot = state.session.snapshot().await;
    snapshot
        .profile
        .map(Json)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("profile missing after save")))
}
