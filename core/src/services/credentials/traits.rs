//! Credential store backend interface

use async_trait::async_trait;

use crate::errors::StoreError;

/// Key/value store with absolute per-key expiry
///
/// Backends enforce TTLs themselves; an expired key must read as absent.
/// The two compare operations must be atomic with respect to every other
/// operation on the same key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Set `key` to `value`, replacing any previous value and TTL
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError>;

    /// Current value, or `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove `key`; returns whether anything was removed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Replace the value with `new` only if it currently equals `expected`
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError>;

    /// Remove `key` only if its value currently equals `expected`
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, StoreError>;

    /// Liveness check used by the health endpoint
    async fn health_check(&self) -> Result<(), StoreError> {
        self.get("health:ping").await.map(|_| ())
    }
}
