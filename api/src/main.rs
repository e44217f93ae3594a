use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use sk_api::{create_app, telemetry, AppState};
use sk_infra::{AccountBackend, CredentialBackend, EmailBackend};
use sk_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging);
    config.validate().context("invalid configuration")?;

    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("Using default JWT secrets; set JWT_SECRET and JWT_REFRESH_SECRET");
    }

    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        "Starting SkillLink API server"
    );

    let accounts = AccountBackend::from_config(&config.database)
        .await
        .context("failed to initialize account store")?;
    let store = CredentialBackend::from_config(&config.cache)
        .await
        .context("failed to initialize credential store")?;
    let email = EmailBackend::from_config(&config.email)
        .context("failed to initialize email sender")?;

    tracing::info!(
        accounts = accounts.kind(),
        credentials = store.kind(),
        email = email.kind(),
        "Adapters ready"
    );

    let state = AppState::new(Arc::new(accounts), Arc::new(store), Arc::new(email), &config)
        .context("failed to build application state")?;
    let state = web::Data::new(state);

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await
        .context("server terminated with an error")
}
