
use chrono::Duration;

use crate::repositories::InMemoryRevocationStore;
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const TEST_SECRET: &str =
    "testSecretKeyForJWTTokenGenerationAndValidationInAuthApplication2024";
pub(super) const TEST_APPLICATION: &str = "Test Auth Application";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::default()
        .with_secret(TEST_SECRET)
        .with_expiration(Duration::hours(1))
        .with_application_name(TEST_APPLICATION)
}

pub(super) fn create_test_service() -> TokenService<InMemoryRevocationStore> {
    TokenService::new(InMemoryRevocationStore::new(), test_config())
        .expect("Failed to create token service")
}

/// Service whose tokens are already expired when issued
pub(super) fn create_expired_service() -> TokenService<InMemoryRevocationStore> {
    let config = test_config().with_expiration(Duration::seconds(-1));
    TokenService::new(InMemoryRevocationStore::new(), config)
        .expect("Failed to create token service")
}
