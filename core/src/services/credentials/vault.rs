//! Typed access to verification codes and refresh sessions

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::VerificationCode;
use crate::errors::StoreError;

use super::config::CredentialVaultConfig;
use super::traits::CredentialStore;

/// Key holding the pending verification code of an account
pub fn verification_key(account_id: Uuid) -> String {
    format!("verification:{}", account_id)
}

/// Key holding the single live refresh token of an account
pub fn refresh_key(account_id: Uuid) -> String {
    format!("refresh:{}", account_id)
}

/// Owns the key namespaces, TTL policy and timeouts over a raw store
///
/// Every call is bounded by `operation_timeout`; a call that runs out of time
/// fails with `StoreError::Timeout` and is never reported as success.
pub struct CredentialVault<S: CredentialStore> {
    store: Arc<S>,
    config: CredentialVaultConfig,
}

impl<S: CredentialStore> Clone for CredentialVault<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: CredentialStore> CredentialVault<S> {
    pub fn new(store: Arc<S>, config: CredentialVaultConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &CredentialVaultConfig {
        &self.config
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.operation_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let after_ms = self.config.operation_timeout.as_millis() as u64;
                tracing::warn!(
                    operation = operation,
                    after_ms = after_ms,
                    event = "credential_store_timeout",
                    "Credential store call timed out"
                );
                Err(StoreError::Timeout { operation, after_ms })
            }
        }
    }

    /// Store `code` for `account_id`, replacing any earlier one
    pub async fn store_verification_code(
        &self,
        account_id: Uuid,
        code: &VerificationCode,
    ) -> Result<(), StoreError> {
        let key = verification_key(account_id);
        self.bounded(
            "put",
            self.store
                .put(&key, code.as_str(), self.config.verification_ttl_seconds),
        )
        .await
    }

    /// The pending code, if one exists and has not expired
    pub async fn verification_code(
        &self,
        account_id: Uuid,
    ) -> Result<Option<VerificationCode>, StoreError> {
        let key = verification_key(account_id);
        let value = self.bounded("get", self.store.get(&key)).await?;
        Ok(value.map(VerificationCode::from))
    }

    /// Remove the code if it is still `code`; false when another caller
    /// consumed or replaced it first
    pub async fn consume_verification_code(
        &self,
        account_id: Uuid,
        code: &VerificationCode,
    ) -> Result<bool, StoreError> {
        let key = verification_key(account_id);
        self.bounded(
            "compare_and_delete",
            self.store.compare_and_delete(&key, code.as_str()),
        )
        .await
    }

    /// Record `token` as the account's only live refresh token
    pub async fn store_refresh_token(&self, account_id: Uuid, token: &str) -> Result<(), StoreError> {
        let key = refresh_key(account_id);
        self.bounded(
            "put",
            self.store.put(&key, token, self.config.refresh_ttl_seconds),
        )
        .await
    }

    pub async fn refresh_token(&self, account_id: Uuid) -> Result<Option<String>, StoreError> {
        let key = refresh_key(account_id);
        self.bounded("get", self.store.get(&key)).await
    }

    /// Replace `presented` with `replacement` in one atomic step; false when
    /// `presented` is no longer the live token
    pub async fn rotate_refresh_token(
        &self,
        account_id: Uuid,
        presented: &str,
        replacement: &str,
    ) -> Result<bool, StoreError> {
        let key = refresh_key(account_id);
        self.bounded(
            "compare_and_swap",
            self.store.compare_and_swap(
                &key,
                presented,
                replacement,
                self.config.refresh_ttl_seconds,
            ),
        )
        .await
    }

    /// Drop the refresh session; returns whether one existed
    pub async fn revoke_refresh_token(&self, account_id: Uuid) -> Result<bool, StoreError> {
        let key = refresh_key(account_id);
        self.bounded("delete", self.store.delete(&key)).await
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.bounded("health_check", self.store.health_check()).await
    }
}
