//! Account store selected at startup

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use sk_core::{Account, AccountRepository, DomainError, InMemoryAccountRepository};
use sk_shared::DatabaseConfig;

use super::connection::DatabasePool;
use super::mysql::MySqlAccountRepository;
use crate::InfrastructureError;

/// The configured account repository
pub enum AccountBackend {
    MySql(MySqlAccountRepository),
    Memory(InMemoryAccountRepository),
}

impl AccountBackend {
    /// MySQL when a database URL is configured, process memory otherwise
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        if config.is_in_memory() {
            tracing::warn!("DATABASE_URL not set; accounts are kept in memory");
            return Ok(Self::Memory(InMemoryAccountRepository::new()));
        }

        let pool = DatabasePool::new(config.clone()).await?;
        if config.run_migrations {
            pool.run_migrations().await?;
        }
        Ok(Self::MySql(MySqlAccountRepository::new(pool.get_pool().clone())))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MySql(_) => "mysql",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl AccountRepository for AccountBackend {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        match self {
            Self::MySql(repo) => repo.find_by_email(email).await,
            Self::Memory(repo) => repo.find_by_email(email).await,
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        match self {
            Self::MySql(repo) => repo.find_by_id(id).await,
            Self::Memory(repo) => repo.find_by_id(id).await,
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        match self {
            Self::MySql(repo) => repo.create(account).await,
            Self::Memory(repo) => repo.create(account).await,
        }
    }

    async fn set_activated(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        match self {
            Self::MySql(repo) => repo.set_activated(id, at).await,
            Self::Memory(repo) => repo.set_activated(id, at).await,
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        match self {
            Self::MySql(repo) => repo.exists_by_email(email).await,
            Self::Memory(repo) => repo.exists_by_email(email).await,
        }
    }
}
