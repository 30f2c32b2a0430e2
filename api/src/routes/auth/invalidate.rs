use actix_web::{web, HttpResponse};
use ag_shared::ApiResponse;
use tracing::info;

use crate::app::AppState;
use crate::handlers::error::token_error_response;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/auth/token/invalidate
///
/// Revokes the bearer token. Any later request presenting it is rejected.
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Token invalidated successfully" }
/// ```
pub async fn invalidate_token(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.token_service.invalidate(&auth.token) {
        Ok(()) => {
            info!("Session ended for {}", auth.username());
            HttpResponse::Ok().json(ApiResponse::ok("Token invalidated successfully"))
        }
        Err(err) => token_error_response(&err),
    }
}
