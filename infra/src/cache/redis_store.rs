//! Redis-backed credential store

use async_trait::async_trait;
use tracing::info;

use sk_core::{CredentialStore, StoreError};
use sk_shared::CacheConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Credential store on a shared Redis instance
///
/// Expiry is delegated to Redis `EX`; both compare operations run as Lua
/// scripts, so they are atomic across every API instance sharing the server.
#[derive(Clone)]
pub struct RedisCredentialStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisCredentialStore {
    /// Connect to the Redis server named in `config`
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config).await?;
        info!(prefix = ?config.key_prefix, "Redis credential store ready");
        Ok(Self::new(client, config))
    }

    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let key = self.config.make_key(key);
        Ok(self.client.set_with_expiry(&key, value, ttl_seconds).await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = self.config.make_key(key);
        Ok(self.client.get(&key).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let key = self.config.make_key(key);
        Ok(self.client.delete(&key).await?)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError> {
        let key = self.config.make_key(key);
        Ok(self
            .client
            .compare_and_swap(&key, expected, new, ttl_seconds)
            .await?)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let key = self.config.make_key(key);
        Ok(self.client.compare_and_delete(&key, expected).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(StoreError::unavailable("unexpected PING reply"))
        }
    }
}
