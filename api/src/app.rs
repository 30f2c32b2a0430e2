//! Application state and factory
//!
//! This module holds the shared application state and provides the factory
//! for creating the Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use ag_core::{InMemoryRevocationStore, TokenService};
use ag_shared::{error_codes, ErrorResponse, HealthResponse};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::handlers::error::json_error_handler;
use crate::middleware::auth::TokenAuth;
use crate::routes::auth::{
    auth_info, current_session, invalidate_token, login, login_info, refresh_token, register,
    register_info,
};
use crate::services::IdentityService;

/// Token service backed by the process-local revocation set
pub type SharedTokenService = Arc<TokenService<InMemoryRevocationStore>>;

/// Application state shared by every worker
pub struct AppState {
    pub token_service: SharedTokenService,
    pub identity_service: IdentityService<InMemoryRevocationStore>,
}

impl AppState {
    pub fn new(token_service: SharedTokenService) -> Self {
        Self {
            identity_service: IdentityService::new(Arc::clone(&token_service)),
            token_service,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/", web::get().to(app_info))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/auth")
                .route("", web::get().to(auth_info))
                .route("/", web::get().to(auth_info))
                .service(
                    web::resource("/register")
                        .route(web::get().to(register_info))
                        .route(web::post().to(register)),
                )
                .service(
                    web::resource("/login")
                        .route(web::get().to(login_info))
                        .route(web::post().to(login)),
                )
                .service(
                    web::resource("/token/refresh")
                        .wrap(TokenAuth::new())
                        .route(web::post().to(refresh_token)),
                )
                .service(
                    web::resource("/token/invalidate")
                        .wrap(TokenAuth::new())
                        .route(web::post().to(invalidate_token)),
                )
                .service(
                    web::resource("/me")
                        .wrap(TokenAuth::new())
                        .route(web::get().to(current_session)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Application info endpoint
async fn app_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "application": "AuthGate",
        "status": "running",
        "description": "Session token issuance, validation and revocation service",
        "endpoints": {
            "health": "GET /health",
            "apiInfo": "GET /api/auth",
            "register": "POST /api/auth/register",
            "login": "POST /api/auth/login",
            "refresh": "POST /api/auth/token/refresh",
            "invalidate": "POST /api/auth/token/invalidate",
            "me": "GET /api/auth/me"
        },
        "note": "Use POST method with JSON body for register and login. Visit /api/auth/register or /api/auth/login with GET to see examples."
    }))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "authgate-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
