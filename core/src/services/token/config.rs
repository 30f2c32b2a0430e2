//! Configuration for the token service

use ag_shared::config::auth::DEFAULT_JWT_SECRET;
use ag_shared::config::JwtConfig;
use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm, HMAC family only
    pub algorithm: Algorithm,
    /// Token lifetime
    pub expiration: Duration,
    /// Issuer name embedded in every token
    pub application_name: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            expiration: Duration::hours(24),
            application_name: "AuthGate".to_string(),
        }
    }
}

impl TokenServiceConfig {
    /// Override the signing secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    /// Override the token lifetime
    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    /// Override the issuer name
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        let algorithm = parse_hmac_algorithm(&config.algorithm).ok_or_else(|| {
            DomainError::Validation {
                message: format!("Unsupported signing algorithm: {}", config.algorithm),
            }
        })?;

        let expiration = Duration::try_hours(config.expiration_hours).ok_or_else(|| {
            DomainError::Validation {
                message: format!("Token lifetime out of range: {}h", config.expiration_hours),
            }
        })?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            expiration,
            application_name: config.application_name.clone(),
        })
    }
}

/// Maps an algorithm name to one of the symmetric algorithms
pub fn parse_hmac_algorithm(name: &str) -> Option<Algorithm> {
    match name.to_uppercase().as_str() {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

pub(crate) fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig::new("a-much-longer-secret-for-hmac-signing-2024")
            .with_expiration_hours(2)
            .with_application_name("Test Auth Application");

        let config = TokenServiceConfig::try_from(&jwt).unwrap();
        assert_eq!(config.expiration, Duration::hours(2));
        assert_eq!(config.application_name, "Test Auth Application");
        assert_eq!(config.algorithm, Algorithm::HS256);
    }

    #[test]
    fn test_from_jwt_config_rejects_asymmetric_algorithm() {
        let mut jwt = JwtConfig::default();
        jwt.algorithm = "RS256".to_string();
        assert!(TokenServiceConfig::try_from(&jwt).is_err());
    }

    #[test]
    fn test_from_jwt_config_rejects_unrepresentable_lifetime() {
        let jwt = JwtConfig::default().with_expiration_hours(i64::MAX / 2);
        let err = TokenServiceConfig::try_from(&jwt).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_parse_hmac_algorithm() {
        assert_eq!(parse_hmac_algorithm("hs512"), Some(Algorithm::HS512));
        assert_eq!(parse_hmac_algorithm("ES256"), None);
    }
}
