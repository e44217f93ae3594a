use actix_web::{web, HttpResponse};

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for POST /api/auth/logout
///
/// Revokes the caller's refresh session. Access tokens already issued stay
/// valid until they expire.
pub async fn logout<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
    auth: AuthContext,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    match state.auth_service.logout(auth.account_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Logout successful")),
        Err(error) => handle_domain_error(&error),
    }
}
