use actix_web::{web, HttpResponse};
use ag_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::RegistrationRequest;
use crate::handlers::error::{token_error_response, validation_error_response};
use crate::services::IdentityError;

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "username": "testuser",
///     "password": "Test123!@",
///     "email": "test@example.com",
///     "birthday": "2000-01-01",
///     "phoneNumber": "+380501234567"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "User registered successfully",
///     "data": {
///         "userId": 12345,
///         "username": "testuser",
///         "email": "test@example.com",
///         "registeredAt": "2024-06-01",
///         "token": "eyJ..."
///     }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Validation failed
/// - 500 Internal Server Error: Token could not be issued
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegistrationRequest>,
) -> HttpResponse {
    match state.identity_service.register(&request) {
        Ok(data) => HttpResponse::Created().json(ApiResponse::success(
            "User registered successfully",
            data,
        )),
        Err(IdentityError::Validation(errors)) => validation_error_response(&errors),
        Err(IdentityError::Token(err)) => token_error_response(&err),
    }
}
