//! Shared wiring for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::Value;
use uuid::Uuid;

use sk_api::AppState;
use sk_core::services::credentials::verification_key;
use sk_core::{CredentialStore, InMemoryAccountRepository, RegisterAccount, Role, TokenKind};
use sk_infra::{LogEmailSender, MemoryCredentialStore};
use sk_shared::AppConfig;

pub type TestState = AppState<InMemoryAccountRepository, MemoryCredentialStore, LogEmailSender>;

pub struct TestApp {
    pub state: web::Data<TestState>,
    pub store: Arc<MemoryCredentialStore>,
}

pub fn test_app() -> TestApp {
    test_app_with(|_| {})
}

/// In-memory app with `configure` applied on top of the test defaults
pub fn test_app_with(configure: impl FnOnce(&mut AppConfig)) -> TestApp {
    let mut config = AppConfig::in_memory();
    config.auth.bcrypt_cost = 4;
    configure(&mut config);

    let store = Arc::new(MemoryCredentialStore::new());
    let state = AppState::new(
        Arc::new(InMemoryAccountRepository::new()),
        store.clone(),
        Arc::new(LogEmailSender),
        &config,
    )
    .expect("state");

    TestApp {
        state: web::Data::new(state),
        store,
    }
}

impl TestApp {
    /// Register an account through the service and return its id
    pub async fn register(&self, email: &str) -> Uuid {
        let registration = self
            .state
            .auth_service
            .register(RegisterAccount {
                email: email.to_string(),
                password: "s3cret-pass".to_string(),
                name: "Robin".to_string(),
                role: Role::Client,
                bio: None,
                skills: vec![],
                portfolio_links: vec![],
            })
            .await
            .expect("registration");
        registration.user.id
    }

    pub fn access_token(&self, account_id: Uuid) -> String {
        self.state
            .codec
            .issue(account_id, TokenKind::Access)
            .expect("access token")
    }

    /// The code currently pending for `account_id`
    pub async fn pending_code(&self, account_id: Uuid) -> Option<String> {
        self.store
            .get(&verification_key(account_id))
            .await
            .expect("store read")
    }
}

pub fn registration_body(email: &str) -> Value {
    serde_json::json!({
        "email": email,
        "password": "s3cret-pass",
        "name": "Robin",
        "role": "FREELANCER",
        "skills": ["rust"],
        "portfolioLinks": []
    })
}
