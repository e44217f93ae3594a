//! Account repository trait defining the interface for account persistence.
//!
//! The authentication core only reads accounts and writes the activation
//! timestamp; registration is the one place a row is created.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Errors returned by implementations are infrastructure faults
/// (`DomainError::Internal`); "not found" is always `Ok(None)` / `Ok(false)`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email
    ///
    /// # Arguments
    /// * `email` - Login email; implementations compare case-insensitively
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Err(DomainError::Auth(AuthError::AccountAlreadyExists))` - email taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Set the activation timestamp
    ///
    /// # Returns
    /// * `Ok(true)` - Account updated
    /// * `Ok(false)` - No account with this id
    async fn set_activated(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Check whether an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
