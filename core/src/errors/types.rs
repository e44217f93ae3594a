//! Error types for authentication, token handling and credential storage
//!
//! Messages here are the ones surfaced to API clients; the presentation layer
//! maps each variant to a status code and error code.

use thiserror::Error;

/// Authentication and session failures a client can act on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    AccountNotFound,

    #[error("User already exists")]
    AccountAlreadyExists,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please verify your email before logging in")]
    EmailNotVerified,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,
}

/// Token codec failures
///
/// These stay inside the codec's callers, which map them onto [`AuthError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token was issued for a different purpose")]
    WrongKind,

    #[error("Malformed token")]
    Malformed,

    #[error("Token generation failed: {message}")]
    GenerationFailed { message: String },
}

/// Credential store faults
///
/// Infrastructure-level: never reported as an authentication failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Credential store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Credential store {operation} timed out after {after_ms}ms")]
    Timeout { operation: &'static str, after_ms: u64 },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
