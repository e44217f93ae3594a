//! Email verification workflow

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{mask_email, Account, VerificationCode};
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::credentials::{CredentialStore, CredentialVault};
use crate::services::session::SessionManager;

use super::config::VerificationConfig;
use super::template::verification_email;
use super::traits::EmailSender;

/// Issues, emails and confirms single-use verification codes
///
/// A successful confirmation activates the account and returns a token pair
/// minted through the same path as login.
pub struct VerificationWorkflow<A, S, E>
where
    A: AccountRepository,
    S: CredentialStore,
    E: EmailSender + 'static,
{
    accounts: Arc<A>,
    vault: CredentialVault<S>,
    email_sender: Arc<E>,
    sessions: Arc<SessionManager<A, S>>,
    config: VerificationConfig,
}

impl<A, S, E> VerificationWorkflow<A, S, E>
where
    A: AccountRepository,
    S: CredentialStore,
    E: EmailSender + 'static,
{
    pub fn new(
        accounts: Arc<A>,
        vault: CredentialVault<S>,
        email_sender: Arc<E>,
        sessions: Arc<SessionManager<A, S>>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            accounts,
            vault,
            email_sender,
            sessions,
            config,
        }
    }

    /// Resend path: issue a new code for an existing, unverified account
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - no account with this id
    /// * `AlreadyVerified` - the account is already activated
    pub async fn request_code(&self, account_id: Uuid) -> DomainResult<()> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if account.is_activated() {
            return Err(AuthError::AlreadyVerified.into());
        }

        self.issue_code(&account).await
    }

    /// Generate and store a fresh code, replacing any earlier one, then send
    /// it in the background
    ///
    /// Only a store failure fails this call; delivery problems are logged.
    pub async fn issue_code(&self, account: &Account) -> DomainResult<()> {
        let code = VerificationCode::generate();
        self.vault.store_verification_code(account.id, &code).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "verification_code_issued",
            "Verification code stored"
        );

        let message = verification_email(
            &self.config.app_name,
            &account.email,
            &account.name,
            &code,
            self.config.code_ttl_seconds,
        );
        let sender = Arc::clone(&self.email_sender);
        let account_id = account.id;

        tokio::spawn(async move {
            match sender.send(&message).await {
                Ok(message_id) => tracing::debug!(
                    account_id = %account_id,
                    message_id = %message_id,
                    event = "verification_email_sent",
                    "Verification email handed to provider"
                ),
                Err(e) => tracing::error!(
                    account_id = %account_id,
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to send verification email"
                ),
            }
        });

        Ok(())
    }

    /// Check `submitted` against the stored code and activate the account
    ///
    /// The comparison is exact. The code is consumed before the account is
    /// touched, so a confirmation that loses a race (a concurrent confirm or
    /// a resend replacing the code) fails with `InvalidOrExpiredCode` and
    /// leaves the account inactive.
    pub async fn confirm_code(&self, account_id: Uuid, submitted: &str) -> DomainResult<AuthSession> {
        let code = match self.vault.verification_code(account_id).await? {
            Some(code) if code.matches(submitted) => code,
            _ => {
                tracing::info!(
                    account_id = %account_id,
                    event = "verification_failed",
                    "Verification code absent or mismatched"
                );
                return Err(AuthError::InvalidOrExpiredCode.into());
            }
        };

        // single use: only the caller that deletes the code may activate
        if !self.vault.consume_verification_code(account_id, &code).await? {
            tracing::info!(
                account_id = %account_id,
                event = "verification_failed",
                "Verification code replaced or already used"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !account.is_activated() {
            let now = Utc::now();
            if !self.accounts.set_activated(account_id, now).await? {
                return Err(AuthError::AccountNotFound.into());
            }
            account.activate(now);
        }

        let tokens = self.sessions.issue(&account).await?;
        tracing::info!(account_id = %account_id, event = "email_verified", "Email verified");

        Ok(AuthSession::new(account.profile(), tokens))
    }
}
