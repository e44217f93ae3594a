//! # Infrastructure Layer
//!
//! Concrete adapters behind the SkillLink core interfaces:
//!
//! - **Cache**: credential stores (Redis, process memory) implementing
//!   `CredentialStore`
//! - **Database**: MySQL account repository using SQLx
//! - **Email**: verification email delivery over an HTTP API or the log
//!
//! Each adapter family exposes a `*Backend` enum chosen from configuration at
//! startup, so the services stay generic without trait objects.

pub mod cache;
pub mod database;
pub mod email;

pub use cache::{CredentialBackend, MemoryCredentialStore, RedisClient, RedisCredentialStore};
pub use database::{AccountBackend, DatabasePool, MySqlAccountRepository};
pub use email::{EmailBackend, HttpEmailSender, LogEmailSender};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure at startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for sk_core::StoreError {
    fn from(err: InfrastructureError) -> Self {
        sk_core::StoreError::unavailable(err.to_string())
    }
}

impl From<InfrastructureError> for sk_core::DomainError {
    fn from(err: InfrastructureError) -> Self {
        sk_core::DomainError::internal(err.to_string())
    }
}
