use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{Account, Role};
use crate::errors::{AuthError, DomainError};
use crate::repositories::account::{AccountRepository, InMemoryAccountRepository};

fn account(email: &str) -> Account {
    Account::new(email, "hash".to_string(), "Test".to_string(), Role::Client)
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryAccountRepository::new();
    let created = repo.create(account("sam@example.com")).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "sam@example.com");

    let by_email = repo.find_by_email("SAM@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(repo.exists_by_email("sam@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = InMemoryAccountRepository::new();
    repo.create(account("dup@example.com")).await.unwrap();

    let result = repo.create(account("Dup@Example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountAlreadyExists))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_set_activated() {
    let repo = InMemoryAccountRepository::new();
    let created = repo.create(account("new@example.com")).await.unwrap();
    assert!(!created.is_activated());

    let now = Utc::now();
    assert!(repo.set_activated(created.id, now).await.unwrap());
    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.email_verified_at, Some(now));

    assert!(!repo.set_activated(Uuid::new_v4(), now).await.unwrap());
}
