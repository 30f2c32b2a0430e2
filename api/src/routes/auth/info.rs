//! Self-describing GET endpoints for the auth API

use actix_web::HttpResponse;
use ag_shared::error_codes;
use serde_json::{json, Value};

/// Handler for GET /api/auth
pub async fn auth_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Auth API",
        "status": "running",
        "endpoints": {
            "register": "POST /api/auth/register",
            "login": "POST /api/auth/login",
            "refresh": "POST /api/auth/token/refresh",
            "invalidate": "POST /api/auth/token/invalidate",
            "me": "GET /api/auth/me"
        },
        "note": "Use POST method with JSON body for register and login endpoints"
    }))
}

/// Handler for GET /api/auth/register
pub async fn register_info() -> HttpResponse {
    method_not_allowed(
        "/api/auth/register",
        json!({
            "username": "testuser",
            "password": "Test123!@",
            "email": "test@example.com",
            "birthday": "2000-01-01",
            "phoneNumber": "+380501234567"
        }),
    )
}

/// Handler for GET /api/auth/login
pub async fn login_info() -> HttpResponse {
    method_not_allowed(
        "/api/auth/login",
        json!({
            "username": "testuser",
            "password": "Test123!@"
        }),
    )
}

fn method_not_allowed(url: &str, example: Value) -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({
        "error": error_codes::METHOD_NOT_ALLOWED,
        "message": "This endpoint only accepts POST requests",
        "method": "POST",
        "url": url,
        "example": example
    }))
}
