//! Credential store selected at startup

use async_trait::async_trait;
use tracing::info;

use sk_core::{CredentialStore, StoreError};
use sk_shared::{CacheConfig, CacheType};

use super::memory_store::MemoryCredentialStore;
use super::redis_store::RedisCredentialStore;
use crate::InfrastructureError;

/// The configured credential store
#[derive(Clone)]
pub enum CredentialBackend {
    Redis(RedisCredentialStore),
    Memory(MemoryCredentialStore),
}

impl CredentialBackend {
    /// Build the backend named by `config.cache_type`
    pub async fn from_config(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let backend = match config.cache_type {
            CacheType::Redis => Self::Redis(RedisCredentialStore::connect(config.clone()).await?),
            CacheType::Memory => {
                Self::Memory(MemoryCredentialStore::with_prefix(config.key_prefix.clone()))
            }
        };
        info!(backend = backend.kind(), "Credential store initialized");
        Ok(backend)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Redis(_) => "redis",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl CredentialStore for CredentialBackend {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.put(key, value, ttl_seconds).await,
            Self::Memory(store) => store.put(key, value, ttl_seconds).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Redis(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        match self {
            Self::Redis(store) => store.delete(key).await,
            Self::Memory(store) => store.delete(key).await,
        }
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError> {
        match self {
            Self::Redis(store) => store.compare_and_swap(key, expected, new, ttl_seconds).await,
            Self::Memory(store) => store.compare_and_swap(key, expected, new, ttl_seconds).await,
        }
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        match self {
            Self::Redis(store) => store.compare_and_delete(key, expected).await,
            Self::Memory(store) => store.compare_and_delete(key, expected).await,
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.health_check().await,
            Self::Memory(store) => store.health_check().await,
        }
    }
}
