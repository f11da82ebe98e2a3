// SPDX-License-Identifier: MIT

//! In-memory document store with the same compare-and-swap contract
//! as the remote backend. Used by the test suite and for offline
//! development.

use crate::db::{DocumentStore, Revision, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-process CAS document store.
///
/// Revisions are monotonically increasing counters rendered as
/// strings; callers must treat them as opaque, exactly as with the
/// remote backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<String, (Value, Revision)>,
    next_revision: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents (test helper).
    pub async fn len(&self) -> usize {
        self.inner.lock().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<(Value, Revision)>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.documents.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        document: &Value,
        expected: Option<&Revision>,
    ) -> Result<Revision, StoreError> {
        let mut inner = self.inner.lock().await;

        match (inner.documents.get(key), expected) {
            // Create path: key must not exist.
            (Some(_), None) => return Err(StoreError::AlreadyExists),
            // CAS path: the expected revision must still be current.
            (Some((_, current)), Some(revision)) if current != revision => {
                return Err(StoreError::Conflict)
            }
            // CAS write against a key that was never created.
            (None, Some(_)) => return Err(StoreError::Conflict),
            _ => {}
        }

        inner.next_revision += 1;
        let revision = Revision(format!("rev-{}", inner.next_revision));
        inner
            .documents
            .insert(key.to_string(), (document.clone(), revision.clone()));
        Ok(revision)
    }
}
