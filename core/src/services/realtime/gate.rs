//! Handshake authentication for real-time connections

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::TokenKind;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::token::TokenCodec;

/// Identity bound to a connection for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmittedConnection {
    pub account_id: Uuid,
}

/// Admits a connection only when it presents a valid access token for an
/// existing account
///
/// The identity is checked once, at the handshake. Later expiry or logout
/// does not affect an already admitted connection.
pub struct ConnectionGate<A: AccountRepository> {
    codec: Arc<TokenCodec>,
    accounts: Arc<A>,
}

impl<A: AccountRepository> ConnectionGate<A> {
    pub fn new(codec: Arc<TokenCodec>, accounts: Arc<A>) -> Self {
        Self { codec, accounts }
    }

    /// # Errors
    ///
    /// * `MissingToken` - no token, or only whitespace
    /// * `InvalidToken` - not a valid access token, or the account is gone
    ///
    /// Account lookup failures propagate as infrastructure errors.
    pub async fn admit(&self, token: Option<&str>) -> DomainResult<AdmittedConnection> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t.strip_prefix("Bearer ").unwrap_or(t),
            _ => return Err(AuthError::MissingToken.into()),
        };

        let account_id = self.codec.verify(token, TokenKind::Access).map_err(|e| {
            tracing::info!(event = "connection_refused", reason = %e, "Handshake token rejected");
            AuthError::InvalidToken
        })?;

        if self.accounts.find_by_id(account_id).await?.is_none() {
            tracing::info!(
                account_id = %account_id,
                event = "connection_refused",
                reason = "unknown_account",
                "Handshake token names no account"
            );
            return Err(AuthError::InvalidToken.into());
        }

        Ok(AdmittedConnection { account_id })
    }
}
