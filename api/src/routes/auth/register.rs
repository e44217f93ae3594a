use actix_web::{web, HttpResponse};
use validator::Validate;

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::RegisterRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/register
///
/// Creates an unverified account and emails a six-digit code.
///
/// # Errors
/// - 400 Bad Request: invalid body or a role that cannot be self-assigned
/// - 409 Conflict: email already registered
pub async fn register<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.register(request.into_inner().into()).await {
        Ok(registration) => HttpResponse::Created().json(ApiResponse::new(
            "Registration successful. Please check your email for verification code.",
            registration,
        )),
        Err(error) => handle_domain_error(&error),
    }
}
