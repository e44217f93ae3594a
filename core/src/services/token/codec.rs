//! HS256 token codec with one secret per token kind

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenCodecConfig;

struct KindKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl KindKeys {
    fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }
}

/// Issues and verifies access and refresh tokens
///
/// Constructed once at startup and shared behind an `Arc`; the keys are never
/// mutated afterwards. Verification is pure and performs no I/O.
pub struct TokenCodec {
    access: KindKeys,
    refresh: KindKeys,
    issuer: String,
    validation: Validation,
    /// Signature-only validation used to detect a token of the other kind
    signature_only: Validation,
}

impl TokenCodec {
    /// Creates a codec, rejecting empty or shared secrets
    pub fn new(config: TokenCodecConfig) -> Result<Self, DomainError> {
        if config.access_secret.is_empty() || config.refresh_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "token secrets must not be empty".to_string(),
            });
        }
        if config.access_secret == config.refresh_secret {
            return Err(DomainError::Validation {
                message: "access and refresh secrets must differ".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let mut signature_only = Validation::new(Algorithm::HS256);
        signature_only.validate_exp = false;
        signature_only.set_required_spec_claims::<&str>(&[]);

        Ok(Self {
            access: KindKeys::new(&config.access_secret, config.access_ttl_seconds),
            refresh: KindKeys::new(&config.refresh_secret, config.refresh_ttl_seconds),
            issuer: config.issuer,
            validation,
            signature_only,
        })
    }

    fn keys(&self, kind: TokenKind) -> &KindKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Lifetime in seconds of tokens of `kind`
    pub fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        self.keys(kind).ttl_seconds
    }

    /// Signs a token of `kind` for `account_id`
    pub fn issue(&self, account_id: Uuid, kind: TokenKind) -> Result<String, TokenError> {
        let keys = self.keys(kind);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + keys.ttl_seconds,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            TokenError::GenerationFailed {
                message: e.to_string(),
            }
        })
    }

    /// Signs a fresh access and refresh token for `account_id`
    pub fn issue_pair(&self, account_id: Uuid) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(account_id, TokenKind::Access)?,
            refresh_token: self.issue(account_id, TokenKind::Refresh)?,
            access_expires_in: self.access.ttl_seconds,
            refresh_expires_in: self.refresh.ttl_seconds,
        })
    }

    /// Verifies `token` as a token of `kind` and returns the account id
    ///
    /// # Errors
    ///
    /// * `InvalidSignature` - not signed by this service
    /// * `WrongKind` - signed with the secret of the other kind
    /// * `Expired` - signature valid but past `exp`
    /// * `Malformed` - not a decodable token or missing/invalid claims
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => {
                    if self.signed_as(token, kind.other()) {
                        TokenError::WrongKind
                    } else {
                        TokenError::InvalidSignature
                    }
                }
                _ => TokenError::Malformed,
            })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }

    fn signed_as(&self, token: &str, kind: TokenKind) -> bool {
        decode::<serde_json::Value>(token, &self.keys(kind).decoding, &self.signature_only).is_ok()
    }
}
