use actix_web::{web, HttpResponse};
use tracing::info;

use crate::app::AppState;
use crate::dto::auth::RefreshTokenResponse;
use crate::handlers::error::token_error_response;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/auth/token/refresh
///
/// Exchanges the bearer token for a fresh one carrying the same identity and
/// metadata. The presented token is revoked, so a second refresh with it
/// fails.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Token refreshed successfully", "token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Token missing, invalid, expired, or already used
pub async fn refresh_token(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.token_service.refresh(&auth.token) {
        Ok(token) => {
            info!("Token refreshed for {}", auth.username());
            HttpResponse::Ok().json(RefreshTokenResponse {
                success: true,
                message: "Token refreshed successfully".to_string(),
                token,
            })
        }
        Err(err) => token_error_response(&err),
    }
}
