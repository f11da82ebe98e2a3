// SPDX-License-Identifier: MIT

//! Document storage layer.
//!
//! A [`DocumentStore`] is a key-addressed JSON document backend with
//! revision-guarded (compare-and-swap) writes. The production backend
//! is [`GitHubStore`]; [`MemoryStore`] implements the same contract
//! in-process for tests and offline development.

pub mod encoding;
pub mod github;
pub mod memory;

pub use github::GitHubStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Opaque revision token identifying the exact stored version of a
/// document. Never interpreted, only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(pub String);

impl Revision {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors produced by a document store.
///
/// A missing document is not an error: `get` returns `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A revision-guarded write lost the race; the stored document is
    /// unchanged and the caller must re-read before retrying.
    #[error("document was modified concurrently")]
    Conflict,

    /// A create (no expected revision) hit an existing key.
    #[error("document already exists")]
    AlreadyExists,

    /// The store is not configured; operations are benign no-ops.
    #[error("document store is not configured")]
    Unavailable,

    /// The document exists but its body could not be decoded.
    #[error("failed to decode document: {0}")]
    Decode(String),

    /// Transport-level failure (connectivity, unexpected status).
    #[error("backend error: {0}")]
    Transport(String),
}

impl From<encoding::DecodeError> for StoreError {
    fn from(err: encoding::DecodeError) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Retry policy for transport failures.
///
/// The default is no retry, matching the observed behavior of the
/// original system. `Conflict` and `AlreadyExists` are never retried;
/// the caller must re-read first.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    #[default]
    None,
    /// Retry up to `attempts` additional times, sleeping `delay`
    /// between attempts.
    FixedDelay { attempts: u32, delay: Duration },
}

impl RetryPolicy {
    /// Delay before the given retry attempt (1-based), or `None` when
    /// the policy is exhausted.
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::FixedDelay { attempts, delay } => {
                (attempt <= *attempts).then_some(*delay)
            }
        }
    }
}

/// A remote key-addressed JSON document backend with optimistic
/// concurrency.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document stored under `key`, with its current
    /// revision. `Ok(None)` means the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<(Value, Revision)>, StoreError>;

    /// Write the document stored under `key`.
    ///
    /// With `expected = Some(r)` the write succeeds only if the
    /// backend's current revision is still `r` (compare-and-swap);
    /// otherwise `Conflict` and the stored document is unchanged.
    ///
    /// With `expected = None` this is a create: a write to an
    /// existing key fails with `AlreadyExists`.
    async fn put(
        &self,
        key: &str,
        document: &Value,
        expected: Option<&Revision>,
    ) -> Result<Revision, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_none_never_backs_off() {
        assert!(RetryPolicy::None.backoff(1).is_none());
    }

    #[test]
    fn test_retry_policy_fixed_delay_exhausts() {
        let policy = RetryPolicy::FixedDelay {
            attempts: 2,
            delay: Duration::from_millis(10),
        };
        assert_eq!(policy.backoff(1), Some(Duration::from_millis(10)));
        assert_eq!(policy.backoff(2), Some(Duration::from_millis(10)));
        assert_eq!(policy.backoff(3), None);
    }
}
