//! Token service module for JWT session management
//!
//! This module handles all token-related operations:
//! - Signed token generation with embedded claims
//! - Validation honoring revocation and expiry
//! - Invalidation and refresh with rotation
//! - Background cleanup of expired revocation entries

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use config::{parse_hmac_algorithm, TokenServiceConfig};
pub use service::{hash_token, TokenService};
