//! Application configuration loaded from environment variables.
//!
//! The store's three connection parameters are deliberately optional:
//! when any is missing the document store runs disabled and the rest
//! of the app stays up (forms render, saves report "unavailable").

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Content-store connection parameters; `None` means disabled mode
    pub store: Option<StoreConfig>,
}

/// Connection parameters for the remote content store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API access token
    pub token: String,
    /// Repository owner/namespace
    pub owner: String,
    /// Data repository name
    pub repo: String,
    /// Optional per-request timeout; `None` means wait indefinitely
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store = match (
            env::var("GITHUB_TOKEN"),
            env::var("GITHUB_DB_OWNER"),
            env::var("GITHUB_DB_REPO"),
        ) {
            (Ok(token), Ok(owner), Ok(repo)) => Some(StoreConfig {
                token: token.trim().to_string(),
                owner: owner.trim().to_string(),
                repo: repo.trim().to_string(),
                timeout: env::var("STORE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_secs),
            }),
            _ => None,
        };

        Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store,
        }
    }

    /// Default config for tests: no remote store.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            store: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the env-var mutations can't race each other.
    #[test]
    fn test_store_config_from_env() {
        env::remove_var("GITHUB_TOKEN");
        env::set_var("GITHUB_DB_OWNER", "someone");
        env::set_var("GITHUB_DB_REPO", "health-db");

        let config = Config::from_env();
        assert!(config.store.is_none());
        assert_eq!(config.port, 8080);

        env::set_var("GITHUB_TOKEN", "ghp_test");
        env::set_var("STORE_TIMEOUT_SECS", "30");

        let config = Config::from_env();
        let store = config.store.expect("store config should load");
        assert_eq!(store.owner, "someone");
        assert_eq!(store.timeout, Some(Duration::from_secs(30)));
    }
}
