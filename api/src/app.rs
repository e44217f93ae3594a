//! Application state and factory

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::{header, Method},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use sk_core::{
    AccountRepository, AuthService, AuthServiceConfig, ChannelBroadcaster, ConnectionGate,
    CredentialStore, CredentialVault, CredentialVaultConfig, DomainError, EmailSender,
    SessionManager, TokenCodec, TokenCodecConfig, VerificationConfig, VerificationWorkflow,
};
use sk_shared::{error_codes, AppConfig, CorsConfig, ErrorResponse, ServerConfig};

use crate::handlers::error::json_error_handler;
use crate::routes::{auth, health, realtime};

/// Shared services handed to every handler
pub struct AppState<A, S, E>
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    pub auth_service: Arc<AuthService<A, S, E>>,
    pub gate: ConnectionGate<A>,
    pub broadcaster: Arc<ChannelBroadcaster>,
    pub codec: Arc<TokenCodec>,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl<A, S, E> AppState<A, S, E>
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    /// Wire the core services over the given adapters
    pub fn new(
        accounts: Arc<A>,
        store: Arc<S>,
        email: Arc<E>,
        config: &AppConfig,
    ) -> Result<Self, DomainError> {
        let codec = Arc::new(TokenCodec::new(TokenCodecConfig::from(&config.auth.jwt))?);
        let vault = CredentialVault::new(
            store,
            CredentialVaultConfig::from_settings(&config.auth, &config.cache),
        );
        let sessions = Arc::new(SessionManager::new(
            accounts.clone(),
            vault.clone(),
            codec.clone(),
        ));
        let verification = Arc::new(VerificationWorkflow::new(
            accounts.clone(),
            vault,
            email,
            sessions.clone(),
            VerificationConfig {
                code_ttl_seconds: config.auth.verification_code_ttl,
                ..Default::default()
            },
        ));
        let auth_service = Arc::new(AuthService::new(
            accounts.clone(),
            sessions,
            verification,
            AuthServiceConfig::from(&config.auth),
        ));

        Ok(Self {
            auth_service,
            gate: ConnectionGate::new(codec.clone(), accounts),
            broadcaster: Arc::new(ChannelBroadcaster::new()),
            codec,
            server: config.server.clone(),
            cors: config.cors.clone(),
        })
    }
}

/// Create and configure the application with all routes
pub fn create_app<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    let cors = create_cors(&state.cors);
    // the auth extractor only needs the codec, not the generic state
    let codec = web::Data::from(state.codec.clone());

    App::new()
        .app_data(state)
        .app_data(codec)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .route("/ws", web::get().to(realtime::ws::connect::<A, S, E>))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(auth::register::<A, S, E>))
                .route("/verify-email", web::post().to(auth::verify_email::<A, S, E>))
                .route(
                    "/resend-verification",
                    web::post().to(auth::resend_verification::<A, S, E>),
                )
                .route("/login", web::post().to(auth::login::<A, S, E>))
                .route("/refresh", web::post().to(auth::refresh::<A, S, E>))
                .route("/logout", web::post().to(auth::logout::<A, S, E>))
                .route("/me", web::get().to(auth::me::<A, S, E>)),
        )
        .default_service(web::route().to(not_found))
}

fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        if config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }
    cors
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
