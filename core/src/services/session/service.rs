//! Login, token issuance, refresh rotation and logout

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{mask_email, Account, TokenKind, TokenPair};
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::credentials::{CredentialStore, CredentialVault};
use crate::services::token::TokenCodec;

use super::password::verify_password;

/// Owns the single refresh session of each account
///
/// Issuing a pair always overwrites `refresh:{id}`, so a new login revokes
/// whatever refresh token was outstanding. Rotation is a compare-and-swap on
/// that key: a refresh token is honored at most once.
pub struct SessionManager<A: AccountRepository, S: CredentialStore> {
    accounts: Arc<A>,
    vault: CredentialVault<S>,
    codec: Arc<TokenCodec>,
}

impl<A: AccountRepository, S: CredentialStore> SessionManager<A, S> {
    pub fn new(accounts: Arc<A>, vault: CredentialVault<S>, codec: Arc<TokenCodec>) -> Self {
        Self {
            accounts,
            vault,
            codec,
        }
    }

    /// Authenticate with email and password
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - unknown email or wrong password
    /// * `EmailNotVerified` - the account has not confirmed its email
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::info!(
                    email = %mask_email(email),
                    event = "login_failed",
                    reason = "unknown_email",
                    "Login rejected"
                );
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !account.is_activated() {
            tracing::info!(
                account_id = %account.id,
                event = "login_failed",
                reason = "email_not_verified",
                "Login rejected"
            );
            return Err(AuthError::EmailNotVerified.into());
        }

        if !verify_password(password, &account.password_hash).await? {
            tracing::info!(
                account_id = %account.id,
                event = "login_failed",
                reason = "password_mismatch",
                "Login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.issue(&account).await?;
        tracing::info!(account_id = %account.id, event = "login_succeeded", "Account logged in");

        Ok(AuthSession::new(account.profile(), tokens))
    }

    /// Mint a pair for `account` and make its refresh token the live one
    pub async fn issue(&self, account: &Account) -> DomainResult<TokenPair> {
        let tokens = self.codec.issue_pair(account.id)?;
        self.vault
            .store_refresh_token(account.id, &tokens.refresh_token)
            .await?;
        Ok(tokens)
    }

    /// Exchange a refresh token for a new pair
    ///
    /// Any codec failure, a superseded token, or losing a concurrent rotation
    /// all surface as `InvalidRefreshToken`. Store faults propagate as-is.
    pub async fn rotate(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let account_id = self
            .codec
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::info!(
                    event = "refresh_rejected",
                    reason = %e,
                    "Refresh token failed verification"
                );
                AuthError::InvalidRefreshToken
            })?;

        let tokens = self.codec.issue_pair(account_id)?;
        let rotated = self
            .vault
            .rotate_refresh_token(account_id, refresh_token, &tokens.refresh_token)
            .await?;

        if !rotated {
            tracing::warn!(
                account_id = %account_id,
                event = "refresh_rejected",
                reason = "not_current",
                "Refresh token is not the live session token"
            );
            return Err(AuthError::InvalidRefreshToken.into());
        }

        tracing::debug!(account_id = %account_id, event = "refresh_rotated", "Refresh token rotated");
        Ok(tokens)
    }

    /// Revoke the account's refresh session; a no-op when none exists
    pub async fn logout(&self, account_id: Uuid) -> DomainResult<()> {
        let revoked = self.vault.revoke_refresh_token(account_id).await?;
        tracing::info!(
            account_id = %account_id,
            had_session = revoked,
            event = "logout",
            "Refresh session revoked"
        );
        Ok(())
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}
