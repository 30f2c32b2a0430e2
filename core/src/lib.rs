//! # AuthGate Core
//!
//! Token lifecycle management for the AuthGate backend.
//! This crate contains the token entities, the token service with its
//! revocation sweeper, the revocation store interface and the error types
//! shared with the API layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, Metadata, TokenData};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryRevocationStore, RevocationStore};
pub use services::{
    CleanupResult, RevocationCleanupConfig, RevocationCleanupService, TokenService,
    TokenServiceConfig,
};
