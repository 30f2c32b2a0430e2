//! Shared setup for API integration tests

#![allow(dead_code)]

use actix_web::web;
use ag_api::app::AppState;
use ag_core::{InMemoryRevocationStore, TokenService, TokenServiceConfig};
use chrono::Duration;
use std::sync::Arc;

pub const TEST_SECRET: &str =
    "testSecretKeyForJWTTokenGenerationAndValidationInAuthApplication2024";

pub fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::default()
        .with_secret(TEST_SECRET)
        .with_application_name("Test Auth Application")
}

pub fn state_with(config: TokenServiceConfig) -> web::Data<AppState> {
    let service = TokenService::new(InMemoryRevocationStore::new(), config)
        .expect("Failed to create token service");
    web::Data::new(AppState::new(Arc::new(service)))
}

pub fn test_state() -> web::Data<AppState> {
    state_with(test_config())
}

/// State whose tokens are expired as soon as they are issued
pub fn expired_state() -> web::Data<AppState> {
    state_with(test_config().with_expiration(Duration::seconds(-1)))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
