//! Unit tests for the in-memory credential store

use std::sync::Arc;
use std::time::Duration;

use sk_core::{CredentialStore, CredentialVault, CredentialVaultConfig, VerificationCode};
use uuid::Uuid;

use crate::cache::MemoryCredentialStore;

#[tokio::test]
async fn test_put_get_delete() {
    let store = MemoryCredentialStore::new();

    store.put("verification:1", "123456", 600).await.unwrap();
    assert_eq!(
        store.get("verification:1").await.unwrap().as_deref(),
        Some("123456")
    );

    assert!(store.delete("verification:1").await.unwrap());
    assert!(!store.delete("verification:1").await.unwrap());
    assert_eq!(store.get("verification:1").await.unwrap(), None);
}

#[tokio::test]
async fn test_put_replaces_value() {
    let store = MemoryCredentialStore::new();

    store.put("k", "first", 60).await.unwrap();
    store.put("k", "second", 60).await.unwrap();

    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let store = MemoryCredentialStore::new();
    store.put("short", "v", 1).await.unwrap();
    store.put("long", "v", 60).await.unwrap();

    tokio::time::advance(Duration::from_millis(1500)).await;

    assert_eq!(store.get("short").await.unwrap(), None);
    assert!(!store.delete("short").await.unwrap());
    assert_eq!(store.get("long").await.unwrap().as_deref(), Some("v"));
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_fails_compare_operations() {
    let store = MemoryCredentialStore::new();
    store.put("k", "v", 1).await.unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(!store.compare_and_swap("k", "v", "w", 60).await.unwrap());
    assert!(!store.compare_and_delete("k", "v").await.unwrap());
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = MemoryCredentialStore::new();
    store.put("a", "v", 1).await.unwrap();
    store.put("b", "v", 1).await.unwrap();
    store.put("c", "v", 60).await.unwrap();

    tokio::time::advance(Duration::from_secs(5)).await;

    assert_eq!(store.purge_expired(), 2);
    assert!(!store.is_empty());
}

#[tokio::test]
async fn test_compare_and_swap() {
    let store = MemoryCredentialStore::new();

    assert!(!store.compare_and_swap("k", "v", "w", 60).await.unwrap());

    store.put("k", "v", 60).await.unwrap();
    assert!(!store.compare_and_swap("k", "other", "w", 60).await.unwrap());
    assert!(store.compare_and_swap("k", "v", "w", 60).await.unwrap());
    assert!(!store.compare_and_swap("k", "v", "x", 60).await.unwrap());
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("w"));
}

#[tokio::test]
async fn test_compare_and_delete() {
    let store = MemoryCredentialStore::new();
    store.put("k", "v", 60).await.unwrap();

    assert!(!store.compare_and_delete("k", "other").await.unwrap());
    assert!(store.compare_and_delete("k", "v").await.unwrap());
    assert!(!store.compare_and_delete("k", "v").await.unwrap());
}

#[tokio::test]
async fn test_prefix_isolates_stores() {
    let shared = MemoryCredentialStore::with_prefix(Some("app".to_string()));
    shared.put("k", "v", 60).await.unwrap();

    let unprefixed = MemoryCredentialStore::new();
    assert_eq!(unprefixed.get("k").await.unwrap(), None);
    assert_eq!(shared.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotation_has_single_winner() {
    let vault = Arc::new(CredentialVault::new(
        Arc::new(MemoryCredentialStore::new()),
        CredentialVaultConfig::default(),
    ));
    let account_id = Uuid::new_v4();
    vault.store_refresh_token(account_id, "current").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let vault = vault.clone();
        handles.push(tokio::spawn(async move {
            vault
                .rotate_refresh_token(account_id, "current", &format!("next-{}", i))
                .await
                .unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    let stored = vault.refresh_token(account_id).await.unwrap().unwrap();
    assert!(stored.starts_with("next-"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_code_consumption_has_single_winner() {
    let vault = Arc::new(CredentialVault::new(
        Arc::new(MemoryCredentialStore::new()),
        CredentialVaultConfig::default(),
    ));
    let account_id = Uuid::new_v4();
    let code = VerificationCode::from("654321".to_string());
    vault.store_verification_code(account_id, &code).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let vault = vault.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            vault
                .consume_verification_code(account_id, &code)
                .await
                .unwrap()
        }));
    }

    let mut consumed = 0;
    for handle in handles {
        if handle.await.unwrap() {
            consumed += 1;
        }
    }
    assert_eq!(consumed, 1);
}
