//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{mask_email, normalize_email, Account, AccountProfile, Role, TokenPair};
use crate::domain::value_objects::{AuthSession, Registration};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::credentials::CredentialStore;
use crate::services::session::{hash_password, SessionManager};
use crate::services::token::TokenCodec;
use crate::services::verification::{EmailSender, VerificationWorkflow};

use super::config::AuthServiceConfig;

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub portfolio_links: Vec<String>,
}

/// Authentication service exposing the account lifecycle to the API layer
pub struct AuthService<A, S, E>
where
    A: AccountRepository,
    S: CredentialStore,
    E: EmailSender + 'static,
{
    /// Account repository for lookups and registration
    accounts: Arc<A>,
    /// Login, issuance, rotation and logout
    sessions: Arc<SessionManager<A, S>>,
    /// Email verification codes
    verification: Arc<VerificationWorkflow<A, S, E>>,
    config: AuthServiceConfig,
}

impl<A, S, E> AuthService<A, S, E>
where
    A: AccountRepository,
    S: CredentialStore,
    E: EmailSender + 'static,
{
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<SessionManager<A, S>>,
        verification: Arc<VerificationWorkflow<A, S, E>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            sessions,
            verification,
            config,
        }
    }

    /// Create an unverified account and email it a verification code
    ///
    /// # Errors
    ///
    /// * `Validation` - bad email, short password, empty name or a role that
    ///   cannot be self-assigned
    /// * `AccountAlreadyExists` - the email is taken
    pub async fn register(&self, input: RegisterAccount) -> DomainResult<Registration> {
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is currently disabled".to_string(),
            });
        }
        self.validate_registration(&input)?;

        let email = normalize_email(&input.email);
        if self.accounts.exists_by_email(&email).await? {
            tracing::info!(
                email = %mask_email(&email),
                event = "registration_rejected",
                reason = "email_taken",
                "Registration rejected"
            );
            return Err(AuthError::AccountAlreadyExists.into());
        }

        let password_hash = hash_password(&input.password, self.config.bcrypt_cost).await?;
        let mut account = Account::new(&email, password_hash, input.name.trim().to_string(), input.role);
        account.bio = input.bio.filter(|b| !b.trim().is_empty());
        account.skills = input.skills;
        account.portfolio_links = input.portfolio_links;

        let account = self.accounts.create(account).await?;
        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            event = "account_registered",
            "Account registered"
        );

        // The account exists at this point; a lost code is recoverable
        // through the resend endpoint.
        if let Err(e) = self.verification.issue_code(&account).await {
            tracing::error!(
                account_id = %account.id,
                error = %e,
                event = "verification_code_issue_failed",
                "Could not issue verification code at registration"
            );
        }

        Ok(Registration {
            user: account.profile(),
        })
    }

    fn validate_registration(&self, input: &RegisterAccount) -> DomainResult<()> {
        let email = input.email.trim();
        let valid_email = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !valid_email {
            return Err(DomainError::Validation {
                message: "A valid email is required".to_string(),
            });
        }
        if input.password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }
        if input.name.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Name is required".to_string(),
            });
        }
        if !input.role.is_self_assignable() {
            return Err(DomainError::Validation {
                message: "Role must be CLIENT or FREELANCER".to_string(),
            });
        }
        Ok(())
    }

    /// Confirm the emailed code; activates the account and signs it in
    pub async fn verify_email(&self, account_id: Uuid, code: &str) -> DomainResult<AuthSession> {
        self.verification.confirm_code(account_id, code).await
    }

    /// Issue a fresh verification code for an unverified account
    pub async fn resend_verification(&self, account_id: Uuid) -> DomainResult<()> {
        self.verification.request_code(account_id).await
    }

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        self.sessions.login(email, password).await
    }

    /// Rotate a refresh token into a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.sessions.rotate(refresh_token).await
    }

    pub async fn logout(&self, account_id: Uuid) -> DomainResult<()> {
        self.sessions.logout(account_id).await
    }

    /// Public view of an account
    pub async fn account_profile(&self, account_id: Uuid) -> DomainResult<AccountProfile> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .map(|account| account.profile())
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }

    pub fn codec(&self) -> &TokenCodec {
        self.sessions.codec()
    }
}
