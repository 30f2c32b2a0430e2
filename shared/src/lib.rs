//! Shared utilities and common types for the AuthGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, revocation sweeper, server, logging)
//! - Error response structures
//! - Input validators used by the identity endpoints
//! - API response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, Environment, JwtConfig, LogFormat, LoggingConfig,
    RevocationConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse};
pub use utils::validation;
