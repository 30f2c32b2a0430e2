use actix_web::HttpResponse;

use crate::dto::auth::CurrentSessionResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/auth/me
pub async fn current_session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(CurrentSessionResponse::from(auth.data))
}
