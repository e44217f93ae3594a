//! Redis client with connection retry and operation retry
//!
//! Wraps a multiplexed connection and exposes the handful of commands the
//! credential store needs, including the two compare operations implemented
//! as Lua scripts so they execute atomically on the server.

use redis::{aio::MultiplexedConnection, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use sk_shared::CacheConfig;

use crate::InfrastructureError;

/// Replace KEYS[1] with ARGV[2] (TTL ARGV[3]) only if it holds ARGV[1]
const COMPARE_AND_SWAP_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
    return 1
end
return 0
"#;

/// Delete KEYS[1] only if it holds ARGV[1]
const COMPARE_AND_DELETE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with automatic retry on transient failures
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the URL and retry budget from `config`
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, config.max_retries.max(1), 100).await
    }

    pub async fn new_with_retry_config(
        config: &CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// SET `key` `value` EX `expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let key = key.to_string();
        let value = value.to_string();

        self.execute_with_retry("SET", move |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("EX")
                    .arg(expiry_seconds)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = key.to_string();

        self.execute_with_retry("GET", move |mut conn| {
            let key = key.clone();
            Box::pin(async move {
                redis::cmd("GET")
                    .arg(key)
                    .query_async::<_, Option<String>>(&mut conn)
                    .await
            })
        })
        .await
    }

    /// Returns true if the key existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();

        let removed: u32 = self
            .execute_with_retry("DEL", move |mut conn| {
                let key = key.clone();
                Box::pin(async move { redis::cmd("DEL").arg(key).query_async(&mut conn).await })
            })
            .await?;

        Ok(removed > 0)
    }

    pub async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let expected = expected.to_string();
        let new = new.to_string();

        let swapped: i64 = self
            .execute_with_retry("CAS", move |mut conn| {
                let key = key.clone();
                let expected = expected.clone();
                let new = new.clone();
                Box::pin(async move {
                    let script = redis::Script::new(COMPARE_AND_SWAP_SCRIPT);
                    script
                        .key(key)
                        .arg(expected)
                        .arg(new)
                        .arg(expiry_seconds)
                        .invoke_async(&mut conn)
                        .await
                })
            })
            .await?;

        Ok(swapped == 1)
    }

    pub async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let expected = expected.to_string();

        let removed: i64 = self
            .execute_with_retry("CAD", move |mut conn| {
                let key = key.clone();
                let expected = expected.clone();
                Box::pin(async move {
                    let script = redis::Script::new(COMPARE_AND_DELETE_SCRIPT);
                    script.key(key).arg(expected).invoke_async(&mut conn).await
                })
            })
            .await?;

        Ok(removed > 0)
    }

    /// PING; returns false on an unexpected reply
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response: String = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Remaining TTL in seconds, `None` if the key is missing or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let key = key.to_string();

        let ttl: i64 = self
            .execute_with_retry("TTL", move |mut conn| {
                let key = key.clone();
                Box::pin(async move { redis::cmd("TTL").arg(key).query_async(&mut conn).await })
            })
            .await?;

        Ok((ttl >= 0).then_some(ttl))
    }

    async fn execute_with_retry<F, T>(
        &self,
        command: &'static str,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        command,
                        attempt = attempts,
                        max_retries = self.max_retries,
                        "Redis operation failed: {}. Retrying in {}ms...",
                        e,
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(command, attempts, "Redis operation failed: {}", e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }
}

/// Whether an error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
