//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, StoreError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for failures caused by the caller's input or credentials, false
    /// for infrastructure faults the caller may retry.
    pub fn is_client_fault(&self) -> bool {
        match self {
            DomainError::Token(TokenError::GenerationFailed { .. }) => false,
            DomainError::Validation { .. }
            | DomainError::NotFound { .. }
            | DomainError::Auth(_)
            | DomainError::Token(_) => true,
            DomainError::Store(_) | DomainError::Internal { .. } => false,
        }
    }

    /// The authentication failure carried by this error, if any
    pub fn auth_error(&self) -> Option<&AuthError> {
        match self {
            DomainError::Auth(e) => Some(e),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
