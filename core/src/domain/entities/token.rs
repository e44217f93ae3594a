//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_SECONDS: i64 = 15 * 60;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Which secret a token is signed with and what it may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Presented on every authenticated request and at the WebSocket handshake
    Access,
    /// Exchanged for a new pair, at most once
    Refresh,
}

impl TokenKind {
    pub fn other(self) -> Self {
        match self {
            TokenKind::Access => TokenKind::Refresh,
            TokenKind::Refresh => TokenKind::Access,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, random per token so that two tokens minted in the same second differ
    pub jti: String,
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,

    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_other() {
        assert_eq!(TokenKind::Access.other(), TokenKind::Refresh);
        assert_eq!(TokenKind::Refresh.other(), TokenKind::Access);
    }

    #[test]
    fn test_token_pair_serializes_camel_case() {
        let pair = TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
            access_expires_in: ACCESS_TOKEN_EXPIRY_SECONDS,
            refresh_expires_in: REFRESH_TOKEN_EXPIRY_SECONDS,
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["accessToken"], "a");
        assert_eq!(json["refreshExpiresIn"], 604800);
    }
}
