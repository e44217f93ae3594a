use actix_web::{web, HttpResponse};

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::ResendVerificationRequest;
use crate::handlers::handle_domain_error;

/// Handler for POST /api/auth/resend-verification
///
/// Replaces any pending code with a fresh one.
pub async fn resend_verification<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
    request: web::Json<ResendVerificationRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    match state.auth_service.resend_verification(request.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Verification code sent successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
