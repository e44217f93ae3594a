//! Unit tests for the verification workflow

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use super::mocks::MockEmailSender;
use crate::domain::entities::{Account, Role, TokenKind};
use crate::errors::{AuthError, DomainError, StoreError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};
use crate::services::credentials::tests::mocks::MockCredentialStore;
use crate::services::credentials::{
    refresh_key, verification_key, CredentialVault, CredentialVaultConfig,
};
use crate::services::session::SessionManager;
use crate::services::token::{TokenCodec, TokenCodecConfig};
use crate::services::verification::{VerificationConfig, VerificationWorkflow};

type Workflow = VerificationWorkflow<InMemoryAccountRepository, MockCredentialStore, MockEmailSender>;

struct Harness {
    accounts: Arc<InMemoryAccountRepository>,
    store: Arc<MockCredentialStore>,
    email: Arc<MockEmailSender>,
    workflow: Arc<Workflow>,
    codec: Arc<TokenCodec>,
}

fn harness(email_fails: bool) -> Harness {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let store = Arc::new(MockCredentialStore::new());
    let email = Arc::new(MockEmailSender::new(email_fails));
    let vault = CredentialVault::new(
        store.clone(),
        CredentialVaultConfig {
            operation_timeout: Duration::from_millis(100),
            ..Default::default()
        },
    );
    let codec = Arc::new(TokenCodec::new(TokenCodecConfig::new("a-secret", "r-secret")).unwrap());
    let sessions = Arc::new(SessionManager::new(accounts.clone(), vault.clone(), codec.clone()));
    let workflow = Arc::new(VerificationWorkflow::new(
        accounts.clone(),
        vault,
        email.clone(),
        sessions,
        VerificationConfig::default(),
    ));
    Harness {
        accounts,
        store,
        email,
        workflow,
        codec,
    }
}

async fn pending_account(accounts: &InMemoryAccountRepository) -> Account {
    let account = Account::new("pending@example.com", "hash".into(), "Pat".into(), Role::Client);
    accounts.create(account).await.unwrap()
}

#[tokio::test]
async fn test_issue_code_stores_and_emails_code() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;

    h.workflow.issue_code(&account).await.unwrap();

    let stored = h.store.value(&verification_key(account.id)).unwrap();
    assert_eq!(stored.len(), 6);
    assert_eq!(h.store.ttl(&verification_key(account.id)), Some(600));

    let sent = h.email.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "pending@example.com");
    assert!(sent[0].html_body.contains(&stored));
}

#[tokio::test]
async fn test_reissue_replaces_previous_code() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;

    h.workflow.issue_code(&account).await.unwrap();
    let first = h.store.value(&verification_key(account.id)).unwrap();
    // make the old code distinguishable even if the generator repeats
    h.store.insert(&verification_key(account.id), "000000");
    h.workflow.issue_code(&account).await.unwrap();
    let second = h.store.value(&verification_key(account.id)).unwrap();

    assert_ne!(second, "000000");
    assert!(first.len() == 6 && second.len() == 6);
}

#[tokio::test]
async fn test_confirm_activates_and_signs_in() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    h.workflow.issue_code(&account).await.unwrap();
    let code = h.store.value(&verification_key(account.id)).unwrap();

    let session = h.workflow.confirm_code(account.id, &code).await.unwrap();

    assert!(session.user.email_verified);
    let stored = h.accounts.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.email_verified_at.is_some());
    assert_eq!(h.store.value(&verification_key(account.id)), None);
    assert_eq!(
        h.store.value(&refresh_key(account.id)).as_deref(),
        Some(session.tokens.refresh_token.as_str())
    );
    assert_eq!(
        h.codec.verify(&session.tokens.access_token, TokenKind::Access).unwrap(),
        account.id
    );
}

#[tokio::test]
async fn test_code_accepted_only_once() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    h.workflow.issue_code(&account).await.unwrap();
    let code = h.store.value(&verification_key(account.id)).unwrap();

    h.workflow.confirm_code(account.id, &code).await.unwrap();
    let second = h.workflow.confirm_code(account.id, &code).await;

    assert!(matches!(
        second,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
}

#[tokio::test]
async fn test_wrong_code_leaves_account_inactive() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    h.store.insert(&verification_key(account.id), "123456");

    for attempt in ["654321", " 123456", "123456 ", ""] {
        let result = h.workflow.confirm_code(account.id, attempt).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
        ));
    }

    let stored = h.accounts.find_by_id(account.id).await.unwrap().unwrap();
    assert!(!stored.is_activated());
    assert_eq!(h.store.value(&verification_key(account.id)).as_deref(), Some("123456"));
}

#[tokio::test]
async fn test_code_replaced_mid_confirm_leaves_account_inactive() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    let key = verification_key(account.id);
    h.store.insert(&key, "482193");
    // a resend lands between the read and the consume
    h.store.overwrite_after_next_get(&key, "999999");

    let result = h.workflow.confirm_code(account.id, "482193").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
    let stored = h.accounts.find_by_id(account.id).await.unwrap().unwrap();
    assert!(!stored.is_activated());
    assert_eq!(h.store.value(&key).as_deref(), Some("999999"));
    assert_eq!(h.store.value(&refresh_key(account.id)), None);

    // the replacement code still works
    let session = h.workflow.confirm_code(account.id, "999999").await.unwrap();
    assert!(session.user.email_verified);
}

#[tokio::test]
async fn test_expired_code_rejected() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    h.store.insert(&verification_key(account.id), "123456");
    h.store.expire(&verification_key(account.id));

    let result = h.workflow.confirm_code(account.id, "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirmations_single_winner() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    h.store.insert(&verification_key(account.id), "777777");

    let mut handles = Vec::new();
    for _ in 0..6 {
        let workflow = h.workflow.clone();
        let id = account.id;
        handles.push(tokio::spawn(async move { workflow.confirm_code(id, "777777").await }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(DomainError::Auth(AuthError::InvalidOrExpiredCode)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_request_code_errors() {
    let h = harness(false);

    let missing = h.workflow.request_code(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::Auth(AuthError::AccountNotFound))));

    let account = pending_account(&h.accounts).await;
    h.workflow.request_code(account.id).await.unwrap();
    let code = h.store.value(&verification_key(account.id)).unwrap();
    h.workflow.confirm_code(account.id, &code).await.unwrap();

    let again = h.workflow.request_code(account.id).await;
    assert!(matches!(again, Err(DomainError::Auth(AuthError::AlreadyVerified))));
}

#[tokio::test]
async fn test_email_failure_does_not_fail_issue() {
    let h = harness(true);
    let account = pending_account(&h.accounts).await;

    h.workflow.issue_code(&account).await.unwrap();

    assert!(h.store.value(&verification_key(account.id)).is_some());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(h.email.sent().is_empty());
}

#[tokio::test]
async fn test_store_failure_fails_issue() {
    let h = harness(false);
    let account = pending_account(&h.accounts).await;
    h.store.set_failing(true);

    let result = h.workflow.issue_code(&account).await;
    assert!(matches!(result, Err(DomainError::Store(StoreError::Unavailable { .. }))));
    assert!(h.email.sent().is_empty());
}
