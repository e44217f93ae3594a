use actix_web::{web, HttpResponse};
use validator::Validate;

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::VerifyEmailRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/verify-email
///
/// Confirms the emailed code, activates the account and signs the caller in.
pub async fn verify_email<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .verify_email(request.user_id, &request.code)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(ApiResponse::new("Email verified successfully", session)),
        Err(error) => handle_domain_error(&error),
    }
}
