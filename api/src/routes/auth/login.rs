use actix_web::{web, HttpResponse};
use ag_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::LoginRequest;
use crate::handlers::error::token_error_response;
use crate::services::IdentityError;

/// Handler for POST /api/auth/login
///
/// Any well-formed username and password are accepted. The issued token
/// carries the fixed email `user@example.com` and a `lastLogin` claim.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Login successful",
///     "data": { "token": "eyJ...", "username": "testuser", "expiresIn": 86400 }
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Credentials failed validation
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    match state.identity_service.login(&request) {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success("Login successful", data)),
        Err(err @ IdentityError::Validation(_)) => {
            HttpResponse::Unauthorized().json(ApiResponse::<()>::failure(err.to_string()))
        }
        Err(IdentityError::Token(err)) => token_error_response(&err),
    }
}
