use actix_web::{web, HttpResponse};

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/auth/me
pub async fn me<A, S, E>(state: web::Data<AppState<A, S, E>>, auth: AuthContext) -> HttpResponse
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    match state.auth_service.account_profile(auth.account_id).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::new("User information", profile)),
        Err(error) => handle_domain_error(&error),
    }
}
