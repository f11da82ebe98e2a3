// SPDX-License-Identifier: MIT

//! Vitals-Tracker API Server
//!
//! Serves the account layer of the personal health dashboard:
//! signup/login against hashed credentials and revision-guarded
//! persistence of each user's metrics document.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitals_tracker::{
    config::Config,
    db::{GitHubStore, RetryPolicy},
    services::SessionManager,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(port = config.port, "Starting Vitals-Tracker API");

    // Initialize the document store; runs disabled when the
    // connection parameters are missing.
    let store = GitHubStore::from_config(config.store.as_ref(), RetryPolicy::default())
        .expect("Failed to initialize document store");
    let store_enabled = store.is_enabled();
    if store_enabled {
        tracing::info!("Document store initialized");
    } else {
        tracing::info!("Document store disabled; saves will report unavailable");
    }

    let session = SessionManager::new(Arc::new(store));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        session,
        store_enabled,
    });

    // Build router
    let app = vitals_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vitals_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
