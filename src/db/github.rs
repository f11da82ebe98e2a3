// SPDX-License-Identifier: MIT

//! GitHub contents API client used as the revisioned document backend.
//!
//! Each document lives at `users/<key>.json` inside a data repository.
//! The file's blob SHA doubles as the revision token: sending it on a
//! write gives compare-and-swap semantics, and omitting it makes the
//! write a create that the API rejects when the file already exists.

use crate::config::StoreConfig;
use crate::db::{encoding, DocumentStore, Revision, RetryPolicy, StoreError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Once;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

// The GitHub REST API rejects requests without a User-Agent (403).
const USER_AGENT: &str = concat!("vitals-tracker/", env!("CARGO_PKG_VERSION"));

static DISABLED_WARNING: Once = Once::new();

/// Document store backed by the GitHub contents API.
///
/// Constructed disabled when configuration is incomplete: every
/// operation then returns [`StoreError::Unavailable`] without
/// touching the network, and a warning is logged once per process.
#[derive(Clone)]
pub struct GitHubStore {
    remote: Option<Remote>,
    retry: RetryPolicy,
}

#[derive(Clone)]
struct Remote {
    http: reqwest::Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
}

/// Read response for a contents-API file.
#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    sha: String,
}

/// Write response; the new blob SHA is nested under `content`.
#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

impl GitHubStore {
    /// Create a store from configuration, or a disabled store when
    /// the connection parameters are absent.
    pub fn from_config(config: Option<&StoreConfig>, retry: RetryPolicy) -> Result<Self, StoreError> {
        match config {
            Some(cfg) => Self::new(cfg, retry),
            None => Ok(Self::disabled()),
        }
    }

    /// Create a connected store.
    pub fn new(config: &StoreConfig, retry: RetryPolicy) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        // No timeout unless configured: a hung call waits indefinitely,
        // matching the original system's behavior.
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| StoreError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            remote: Some(Remote {
                http,
                base_url: GITHUB_API_BASE.to_string(),
                token: config.token.clone(),
                owner: config.owner.clone(),
                repo: config.repo.clone(),
            }),
            retry,
        })
    }

    /// Create a disabled store (no connection parameters).
    pub fn disabled() -> Self {
        Self {
            remote: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Whether the store has a configured backend.
    pub fn is_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Get the remote handle, or `Unavailable` with a once-per-process
    /// warning when the store is disabled.
    fn remote(&self) -> Result<&Remote, StoreError> {
        match &self.remote {
            Some(remote) => Ok(remote),
            None => {
                DISABLED_WARNING.call_once(|| {
                    tracing::warn!(
                        "store configuration missing (token/owner/repo); persistence is disabled"
                    );
                });
                Err(StoreError::Unavailable)
            }
        }
    }

    async fn get_once(&self, key: &str) -> Result<Option<(Value, Revision)>, StoreError> {
        let remote = self.remote()?;
        let response = remote
            .http
            .get(remote.document_url(key))
            .bearer_auth(&remote.token)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Transport(format!("HTTP {}: {}", status, body)));
        }

        let file: ContentResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Transport(format!("JSON parse error: {}", e)))?;

        let text = encoding::decode_text(&file.content)?;
        let document: Value =
            serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(Some((document, Revision(file.sha))))
    }

    async fn put_once(
        &self,
        key: &str,
        document: &Value,
        expected: Option<&Revision>,
    ) -> Result<Revision, StoreError> {
        let remote = self.remote()?;

        let text = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut body = serde_json::json!({
            "message": match expected {
                Some(_) => format!("Update user {}", key),
                None => format!("Create user {}", key),
            },
            "content": encoding::encode_text(&text),
        });
        if let Some(revision) = expected {
            body["sha"] = Value::String(revision.as_str().to_string());
        }

        let response = remote
            .http
            .put(remote.document_url(key))
            .bearer_auth(&remote.token)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();

        // The API signals a lost write race with 409/422. Which error
        // it means depends on what we asked for: with a revision it is
        // a stale CAS write, without one it is a create hitting an
        // existing key.
        if status.as_u16() == 409 || status.as_u16() == 422 {
            return Err(match expected {
                Some(_) => StoreError::Conflict,
                None => StoreError::AlreadyExists,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Transport(format!("HTTP {}: {}", status, body)));
        }

        let written: WriteResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Transport(format!("JSON parse error: {}", e)))?;

        Ok(Revision(written.content.sha))
    }
}

impl Remote {
    fn document_url(&self, key: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/users/{}.json",
            self.base_url,
            self.owner,
            self.repo,
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl DocumentStore for GitHubStore {
    async fn get(&self, key: &str) -> Result<Option<(Value, Revision)>, StoreError> {
        let mut attempt = 0;
        loop {
            match self.get_once(key).await {
                Err(StoreError::Transport(detail)) => {
                    attempt += 1;
                    match self.retry.backoff(attempt) {
                        Some(delay) => {
                            tracing::warn!(key, attempt, error = %detail, "retrying read");
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(StoreError::Transport(detail)),
                    }
                }
                other => return other,
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        document: &Value,
        expected: Option<&Revision>,
    ) -> Result<Revision, StoreError> {
        let mut attempt = 0;
        loop {
            match self.put_once(key, document, expected).await {
                Err(StoreError::Transport(detail)) => {
                    attempt += 1;
                    match self.retry.backoff(attempt) {
                        Some(delay) => {
                            tracing::warn!(key, attempt, error = %detail, "retrying write");
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(StoreError::Transport(detail)),
                    }
                }
                other => return other,
            }
        }
    }
}
