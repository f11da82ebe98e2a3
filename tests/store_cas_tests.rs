// SPDX-License-Identifier: MIT

//! Compare-and-swap guarantees of the document store contract,
//! exercised against the in-memory backend (which implements the
//! same contract as the remote one).

use serde_json::json;
use vitals_tracker::db::{DocumentStore, MemoryStore, StoreError};

#[tokio::test]
async fn test_stale_revision_is_rejected_and_document_unchanged() {
    let store = MemoryStore::new();

    let r0 = store.put("alice", &json!({"v": 0}), None).await.unwrap();

    // A concurrent writer advances the document to r1.
    let r1 = store
        .put("alice", &json!({"v": 1}), Some(&r0))
        .await
        .unwrap();

    // Our write still carries r0 and must lose.
    let result = store.put("alice", &json!({"v": 2}), Some(&r0)).await;
    assert!(matches!(result, Err(StoreError::Conflict)));

    // The document at r1 was not altered by the rejected write.
    let (doc, current) = store.get("alice").await.unwrap().unwrap();
    assert_eq!(doc, json!({"v": 1}));
    assert_eq!(current, r1);
}

#[tokio::test]
async fn test_create_of_existing_key_is_already_exists() {
    let store = MemoryStore::new();
    store.put("alice", &json!({"v": 0}), None).await.unwrap();

    let result = store.put("alice", &json!({"v": 99}), None).await;
    assert!(matches!(result, Err(StoreError::AlreadyExists)));

    let (doc, _) = store.get("alice").await.unwrap().unwrap();
    assert_eq!(doc, json!({"v": 0}));
}

#[tokio::test]
async fn test_cas_against_missing_key_is_conflict() {
    let store = MemoryStore::new();
    let r0 = store.put("alice", &json!({}), None).await.unwrap();

    let result = store.put("ghost", &json!({}), Some(&r0)).await;
    assert!(matches!(result, Err(StoreError::Conflict)));
}

#[tokio::test]
async fn test_revisions_are_distinct_across_writes() {
    let store = MemoryStore::new();
    let r0 = store.put("alice", &json!({"v": 0}), None).await.unwrap();
    let r1 = store
        .put("alice", &json!({"v": 1}), Some(&r0))
        .await
        .unwrap();
    let r2 = store
        .put("alice", &json!({"v": 2}), Some(&r1))
        .await
        .unwrap();
    assert_ne!(r0, r1);
    assert_ne!(r1, r2);
}
