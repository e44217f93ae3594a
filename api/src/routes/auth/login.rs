use actix_web::{web, HttpResponse};
use validator::Validate;

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/login
///
/// # Errors
/// - 401 Unauthorized: unknown email or wrong password
/// - 403 Forbidden: email not yet verified
pub async fn login<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(ApiResponse::new("Login successful", session)),
        Err(error) => handle_domain_error(&error),
    }
}
