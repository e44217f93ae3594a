//! Unit tests for authentication service

use crate::domain::entities::Role;
use crate::errors::{AuthError, DomainError};
use crate::repositories::AccountRepository;
use crate::services::credentials::{refresh_key, verification_key};

use crate::services::auth::AuthServiceConfig;

use super::mocks::{create_test_service, create_test_service_with, registration};

#[tokio::test]
async fn test_register_creates_unverified_account_and_sends_code() {
    let ctx = create_test_service(false);

    let result = ctx.service.register(registration("Robin@Example.com")).await.unwrap();

    assert_eq!(result.user.email, "robin@example.com");
    assert_eq!(result.user.role, Role::Freelancer);
    assert!(!result.user.email_verified);
    assert_eq!(result.user.skills, vec!["rust", "actix"]);

    let stored = ctx.accounts.find_by_id(result.user.id).await.unwrap().unwrap();
    assert!(bcrypt::verify("s3cret-pass", &stored.password_hash).unwrap());

    let code = ctx.store.value(&verification_key(result.user.id)).unwrap();
    let sent = ctx.email.wait_for(1).await;
    assert_eq!(sent[0].subject, "Verify Your SkillLink Account");
    assert!(sent[0].html_body.contains(&code));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let ctx = create_test_service(false);
    ctx.service.register(registration("dup@example.com")).await.unwrap();

    let result = ctx.service.register(registration("DUP@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountAlreadyExists))
    ));
}

#[tokio::test]
async fn test_register_rejected_when_registration_closed() {
    let ctx = create_test_service_with(
        AuthServiceConfig {
            bcrypt_cost: 4,
            allow_registration: false,
            ..Default::default()
        },
        false,
    );

    let result = ctx.service.register(registration("closed@example.com")).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert!(ctx.accounts.find_by_email("closed@example.com").await.unwrap().is_none());
    assert!(ctx.email.sent().is_empty());
}

#[tokio::test]
async fn test_register_validation() {
    let ctx = create_test_service(false);

    let mut short = registration("short@example.com");
    short.password = "12345".to_string();
    assert!(matches!(
        ctx.service.register(short).await,
        Err(DomainError::Validation { .. })
    ));

    let mut admin = registration("admin@example.com");
    admin.role = Role::Admin;
    assert!(matches!(
        ctx.service.register(admin).await,
        Err(DomainError::Validation { .. })
    ));

    let mut bad_email = registration("nobody");
    bad_email.email = "nobody".to_string();
    assert!(matches!(
        ctx.service.register(bad_email).await,
        Err(DomainError::Validation { .. })
    ));

    assert!(ctx.accounts.is_empty().await);
}

#[tokio::test]
async fn test_register_survives_email_failure() {
    let ctx = create_test_service(true);

    let result = ctx.service.register(registration("mailfail@example.com")).await;

    let user = result.unwrap().user;
    assert!(ctx.store.value(&verification_key(user.id)).is_some());
}

#[tokio::test]
async fn test_register_survives_store_failure() {
    let ctx = create_test_service(false);
    ctx.store.set_failing(true);

    let user = ctx
        .service
        .register(registration("storefail@example.com"))
        .await
        .unwrap()
        .user;

    // resend recovers once the store is back
    ctx.store.set_failing(false);
    ctx.service.resend_verification(user.id).await.unwrap();
    assert!(ctx.store.value(&verification_key(user.id)).is_some());
}

#[tokio::test]
async fn test_full_lifecycle() {
    let ctx = create_test_service(false);
    let user = ctx
        .service
        .register(registration("flow@example.com"))
        .await
        .unwrap()
        .user;

    let early = ctx.service.login("flow@example.com", "s3cret-pass").await;
    assert!(matches!(early, Err(DomainError::Auth(AuthError::EmailNotVerified))));

    let code = ctx.store.value(&verification_key(user.id)).unwrap();
    let verified = ctx.service.verify_email(user.id, &code).await.unwrap();
    assert!(verified.user.email_verified);

    let again = ctx.service.verify_email(user.id, &code).await;
    assert!(matches!(again, Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))));

    let session = ctx.service.login("flow@example.com", "s3cret-pass").await.unwrap();
    let rotated = ctx.service.refresh(&session.tokens.refresh_token).await.unwrap();
    assert!(matches!(
        ctx.service.refresh(&session.tokens.refresh_token).await,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));

    ctx.service.logout(user.id).await.unwrap();
    assert_eq!(ctx.store.value(&refresh_key(user.id)), None);
    assert!(matches!(
        ctx.service.refresh(&rotated.refresh_token).await,
        Err(DomainError::Auth(AuthError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_resend_for_verified_account() {
    let ctx = create_test_service(false);
    let user = ctx
        .service
        .register(registration("resend@example.com"))
        .await
        .unwrap()
        .user;
    let code = ctx.store.value(&verification_key(user.id)).unwrap();
    ctx.service.verify_email(user.id, &code).await.unwrap();

    let result = ctx.service.resend_verification(user.id).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AlreadyVerified))));
}

#[tokio::test]
async fn test_account_profile() {
    let ctx = create_test_service(false);
    let user = ctx
        .service
        .register(registration("me@example.com"))
        .await
        .unwrap()
        .user;

    let profile = ctx.service.account_profile(user.id).await.unwrap();
    assert_eq!(profile, user);

    let missing = ctx.service.account_profile(uuid::Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::Auth(AuthError::AccountNotFound))));
}
