use actix_web::{web, HttpResponse};
use validator::Validate;

use sk_core::{AccountRepository, CredentialStore, EmailSender};
use sk_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::RefreshTokenRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/refresh
///
/// Exchanges the live refresh token for a new pair. A refresh token works
/// once; replaying it returns 401.
pub async fn refresh<A, S, E>(
    state: web::Data<AppState<A, S, E>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(ApiResponse::new("Token refreshed successfully", tokens)),
        Err(error) => handle_domain_error(&error),
    }
}
