//! Mapping of domain failures to HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use ag_core::{DomainError, TokenError};
use ag_shared::validation::ValidationErrors;
use ag_shared::{error_codes, ApiResponse, ErrorResponse};
use tracing::{error, warn};

/// The only message a client sees for a rejected token
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// 401 for every authentication failure, 500 for internal ones
///
/// The specific reason is logged but never sent to the client.
pub fn token_error_response(err: &TokenError) -> HttpResponse {
    if err.is_authentication_failure() {
        warn!(reason = err.code(), "Token rejected: {}", err);
        unauthorized_response()
    } else {
        error!(reason = err.code(), "Token operation failed: {}", err);
        internal_error_response()
    }
}

pub fn domain_error_response(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Token(token_error) => token_error_response(token_error),
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::Internal { message } => {
            error!("Internal error: {}", message);
            internal_error_response()
        }
    }
}

pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        INVALID_TOKEN_MESSAGE,
    ))
}

pub fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

/// 400 carrying the collected field errors
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::failure(format!(
        "Validation failed: {}",
        errors.summary()
    )))
}

/// Wrap a prepared response so middleware can short-circuit with it
pub fn into_actix_error(response: HttpResponse) -> actix_web::Error {
    let status = response.status();
    InternalError::from_response(status, response).into()
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), "Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::BAD_REQUEST, "Request body is not valid JSON")
            .add_detail("reason", err.to_string()),
    );
    into_actix_error(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_authentication_failures_map_to_401() {
        for err in [
            TokenError::invalid_argument("token"),
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::Revoked,
        ] {
            assert_eq!(token_error_response(&err).status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_generation_failure_maps_to_500() {
        let response = token_error_response(&TokenError::GenerationFailed);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_validation_maps_to_400() {
        let err = DomainError::Validation {
            message: "bad".to_string(),
        };
        assert_eq!(domain_error_response(&err).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_actix_error_keeps_status() {
        let err = into_actix_error(unauthorized_response());
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }
}
