// SPDX-License-Identifier: MIT

use std::sync::Arc;
use vitals_tracker::config::Config;
use vitals_tracker::db::MemoryStore;
use vitals_tracker::routes::create_router;
use vitals_tracker::services::SessionManager;
use vitals_tracker::AppState;

/// Create a session manager backed by an in-memory store, returning
/// the store handle too so tests can manipulate documents directly.
#[allow(dead_code)]
pub fn test_session() -> (SessionManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = SessionManager::new(store.clone());
    (session, store)
}

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let store = Arc::new(MemoryStore::new());
    let session = SessionManager::new(store);

    let state = Arc::new(AppState {
        config: Config::test_default(),
        session,
        store_enabled: true,
    });

    (create_router(state.clone()), state)
}
