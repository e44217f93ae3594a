//! Results of successful authentication operations.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AccountProfile, TokenPair};

/// Returned by login and email verification: who the caller is and the
/// freshly issued token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AccountProfile,

    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl AuthSession {
    pub fn new(user: AccountProfile, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}

/// Returned by registration; the account is not yet activated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub user: AccountProfile,
}
