// SPDX-License-Identifier: MIT

//! Vitals-Tracker: account persistence for a personal health dashboard
//!
//! This crate provides the backend for the dashboard's account layer:
//! hashed-credential authentication and per-user JSON documents kept
//! in a revision-tracked remote content repository, with optimistic
//! concurrency on every save.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::SessionManager;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: SessionManager,
    /// Whether the document store has a configured backend.
    pub store_enabled: bool,
}
