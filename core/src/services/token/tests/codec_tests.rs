//! Unit tests for the token codec

use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenCodec, TokenCodecConfig};

fn codec() -> TokenCodec {
    TokenCodec::new(TokenCodecConfig::new("access-secret", "refresh-secret")).unwrap()
}

#[test]
fn test_issue_and_verify_each_kind() {
    let codec = codec();
    let account_id = Uuid::new_v4();

    let access = codec.issue(account_id, TokenKind::Access).unwrap();
    let refresh = codec.issue(account_id, TokenKind::Refresh).unwrap();

    assert_eq!(codec.verify(&access, TokenKind::Access).unwrap(), account_id);
    assert_eq!(codec.verify(&refresh, TokenKind::Refresh).unwrap(), account_id);
}

#[test]
fn test_pair_lifetimes() {
    let codec = codec();
    let pair = codec.issue_pair(Uuid::new_v4()).unwrap();
    assert_eq!(pair.access_expires_in, 900);
    assert_eq!(pair.refresh_expires_in, 604800);
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[test]
fn test_tokens_minted_together_are_distinct() {
    let codec = codec();
    let account_id = Uuid::new_v4();
    let first = codec.issue(account_id, TokenKind::Refresh).unwrap();
    let second = codec.issue(account_id, TokenKind::Refresh).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_wrong_kind_detected() {
    let codec = codec();
    let account_id = Uuid::new_v4();

    let access = codec.issue(account_id, TokenKind::Access).unwrap();
    let refresh = codec.issue(account_id, TokenKind::Refresh).unwrap();

    assert_eq!(codec.verify(&access, TokenKind::Refresh), Err(TokenError::WrongKind));
    assert_eq!(codec.verify(&refresh, TokenKind::Access), Err(TokenError::WrongKind));
}

#[test]
fn test_foreign_signature_rejected() {
    let other = TokenCodec::new(TokenCodecConfig::new("another-access", "another-refresh")).unwrap();
    let token = other.issue(Uuid::new_v4(), TokenKind::Access).unwrap();

    assert_eq!(codec().verify(&token, TokenKind::Access), Err(TokenError::InvalidSignature));
}

#[test]
fn test_expired_token() {
    let mut config = TokenCodecConfig::new("access-secret", "refresh-secret");
    config.access_ttl_seconds = -5;
    let expired_codec = TokenCodec::new(config).unwrap();

    let token = expired_codec.issue(Uuid::new_v4(), TokenKind::Access).unwrap();
    assert_eq!(codec().verify(&token, TokenKind::Access), Err(TokenError::Expired));
}

#[test]
fn test_malformed_token() {
    let codec = codec();
    assert_eq!(codec.verify("not-a-jwt", TokenKind::Access), Err(TokenError::Malformed));
    assert_eq!(codec.verify("", TokenKind::Refresh), Err(TokenError::Malformed));
}

#[test]
fn test_non_uuid_subject_is_malformed() {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "user-42".to_string(),
        iat: now,
        exp: now + 60,
        iss: "skilllink".to_string(),
        jti: "x".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"access-secret"),
    )
    .unwrap();

    assert_eq!(codec().verify(&token, TokenKind::Access), Err(TokenError::Malformed));
}

#[test]
fn test_construction_rejects_bad_secrets() {
    assert!(matches!(
        TokenCodec::new(TokenCodecConfig::new("same", "same")),
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        TokenCodec::new(TokenCodecConfig::new("", "refresh")),
        Err(DomainError::Validation { .. })
    ));
}
