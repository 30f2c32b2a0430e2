//! Authentication configuration: token signing and revocation retention

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Secret used when `JWT_SECRET` is not set. Rejected in production.
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// Minimum secret length in bytes for HMAC-SHA256 signing
pub const MIN_SECRET_LENGTH: usize = 32;

/// Algorithms accepted for symmetric token signing
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Longest accepted token lifetime (ten years)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret the signing key is derived from
    pub secret: String,

    /// Token lifetime in hours
    pub expiration_hours: i64,

    /// Issuer name embedded in every token
    pub application_name: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            expiration_hours: 24,
            application_name: String::from("AuthGate"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in hours
    pub fn with_expiration_hours(mut self, hours: i64) -> Self {
        self.expiration_hours = hours;
        self
    }

    /// Set the issuer name embedded in tokens
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Check the settings that do not depend on the environment
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Invalid {
                field: "jwt.secret".to_string(),
                reason: format!("must be at least {} bytes", MIN_SECRET_LENGTH),
            });
        }
        if self.expiration_hours <= 0 {
            return Err(ConfigError::Invalid {
                field: "jwt.expiration_hours".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.expiration_hours > MAX_EXPIRATION_HOURS {
            return Err(ConfigError::Invalid {
                field: "jwt.expiration_hours".to_string(),
                reason: format!("must not exceed {}", MAX_EXPIRATION_HOURS),
            });
        }
        if self.application_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "jwt.application_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !SUPPORTED_ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(ConfigError::Invalid {
                field: "jwt.algorithm".to_string(),
                reason: format!("unsupported algorithm {}", self.algorithm),
            });
        }
        Ok(())
    }
}

/// Retention policy for the revocation set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// How often the sweeper runs (in seconds)
    pub interval_seconds: u64,

    /// How long a revoked entry is kept after its token expired (in seconds)
    pub grace_period_seconds: i64,

    /// Whether the sweeper runs at all
    pub enabled: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            grace_period_seconds: 3600,
            enabled: true,
        }
    }
}

impl RevocationConfig {
    /// Reject a sweeper schedule that would drop live revocations or spin
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "revocation.interval_seconds".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.grace_period_seconds < 0 {
            return Err(ConfigError::Invalid {
                field: "revocation.grace_period_seconds".to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation sweeper configuration
    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            application_name: std::env::var("JWT_APPLICATION_NAME")
                .unwrap_or(defaults.application_name),
            algorithm: std::env::var("JWT_ALGORITHM")
                .map(|v| v.to_uppercase())
                .unwrap_or(defaults.algorithm),
        };

        let sweeper = RevocationConfig::default();
        let revocation = RevocationConfig {
            interval_seconds: std::env::var("REVOCATION_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(sweeper.interval_seconds),
            grace_period_seconds: std::env::var("REVOCATION_GRACE_PERIOD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(sweeper.grace_period_seconds),
            enabled: std::env::var("REVOCATION_CLEANUP_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(sweeper.enabled),
        };

        Self { jwt, revocation }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expiration_hours, 24);
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.application_name, "AuthGate");
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("a-much-longer-secret-for-hmac-signing-2024")
            .with_expiration_hours(2)
            .with_application_name("Test Auth Application");

        assert_eq!(config.expiration_hours, 2);
        assert_eq!(config.application_name, "Test Auth Application");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_rejects_short_secret() {
        let err = JwtConfig::new("short").validate().unwrap_err();
        assert!(err.to_string().contains("jwt.secret"));
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_expiry() {
        let config = JwtConfig::default().with_expiration_hours(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jwt.expiration_hours"));
    }

    #[test]
    fn test_jwt_config_rejects_overlong_expiry() {
        let config = JwtConfig::default().with_expiration_hours(3_000_000_000);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jwt.expiration_hours"));

        let config = JwtConfig::default().with_expiration_hours(MAX_EXPIRATION_HOURS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_rejects_unknown_algorithm() {
        let mut config = JwtConfig::default();
        config.algorithm = "RS256".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_revocation_config_default() {
        let config = RevocationConfig::default();
        assert_eq!(config.interval_seconds, 3600);
        assert_eq!(config.grace_period_seconds, 3600);
        assert!(config.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_revocation_config_rejects_negative_grace_period() {
        let config = RevocationConfig {
            grace_period_seconds: -7200,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("revocation.grace_period_seconds"));
    }

    #[test]
    fn test_revocation_config_rejects_zero_interval() {
        let config = RevocationConfig {
            interval_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("revocation.interval_seconds"));
    }
}
