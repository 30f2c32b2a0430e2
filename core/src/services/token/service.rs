//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, Metadata, TokenData};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::config::{is_hmac, TokenServiceConfig};

/// Issues, validates, invalidates and refreshes signed session tokens
///
/// The service is immutable after construction apart from the revocation
/// store, which handles its own synchronization. Share it across request
/// handlers behind an `Arc`.
pub struct TokenService<R: RevocationStore> {
    revocation_store: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: RevocationStore> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `revocation_store` - Store holding invalidated tokens
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance, or an error if the secret is empty or
    /// the algorithm is not a symmetric one
    pub fn new(revocation_store: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !is_hmac(config.algorithm) {
            return Err(DomainError::Validation {
                message: format!("Unsupported signing algorithm: {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is enforced on the expiresAt claim, not by the library
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "iss"]);
        validation.set_issuer(&[config.application_name.as_str()]);

        Ok(Self {
            revocation_store,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Generates a new signed token
    ///
    /// # Arguments
    ///
    /// * `username` - Principal identity, must not be blank
    /// * `email` - Contact identity, must not be blank
    /// * `metadata` - Extra claims; keys colliding with reserved claims are dropped
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact signed token
    /// * `Err(TokenError)` - Blank input or signing failure
    pub fn generate(
        &self,
        username: &str,
        email: &str,
        metadata: Option<Metadata>,
    ) -> Result<String, TokenError> {
        ensure_present("username", username)?;
        ensure_present("email", email)?;

        let claims = Claims::new(
            username,
            email,
            &self.config.application_name,
            Utc::now(),
            self.config.expiration,
            metadata,
        )
        .ok_or_else(|| {
            warn!("Token lifetime for {} overflows the expiry instant", username);
            TokenError::GenerationFailed
        })?;

        let token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                warn!("Failed to sign token for {}: {}", username, e);
                TokenError::GenerationFailed
            })?;

        info!(
            "Token generated for {} (expires at {})",
            username, claims.expires_at
        );
        Ok(token)
    }

    /// Validates a token and returns its decoded data
    ///
    /// Checks run in order: blank input, revocation, signature and structure,
    /// then expiry. Revocation therefore wins over every other failure.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenData)` - The token is authentic, unrevoked and unexpired
    /// * `Err(TokenError)` - The first check that failed
    pub fn validate(&self, token: &str) -> Result<TokenData, TokenError> {
        ensure_present("token", token)?;

        if self.revocation_store.contains(&hash_token(token)) {
            warn!("Rejected revoked token");
            return Err(TokenError::Revoked);
        }

        let claims = self.decode_claims(token)?;

        if claims.is_expired() {
            warn!("Token for {} expired at {}", claims.username, claims.expires_at);
            return Err(TokenError::Expired);
        }

        debug!("Token validated for {}", claims.username);
        Ok(claims.into_token_data())
    }

    /// Revokes a token before its natural expiry
    ///
    /// The token must carry a valid signature. Expiry is not checked, and
    /// invalidating an already revoked token succeeds without change.
    pub fn invalidate(&self, token: &str) -> Result<(), TokenError> {
        ensure_present("token", token)?;

        let claims = self.decode_claims(token)?;
        if self
            .revocation_store
            .insert(hash_token(token), claims.expires_at)
        {
            info!("Token invalidated for {}", claims.username);
        } else {
            debug!("Token for {} was already invalidated", claims.username);
        }
        Ok(())
    }

    /// Replaces a valid token with a fresh one carrying the same identity
    ///
    /// The new token is minted before the old one is revoked. If a concurrent
    /// caller revokes the old token in between, the new token is discarded
    /// and `Revoked` is returned, so a token can be refreshed at most once.
    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        let data = self.validate(token)?;

        let new_token = self.generate(&data.username, &data.email, Some(data.metadata))?;

        if !self
            .revocation_store
            .insert(hash_token(token), data.expires_at)
        {
            warn!("Concurrent refresh of a token for {} rejected", data.username);
            return Err(TokenError::Revoked);
        }

        info!("Token refreshed for {}", data.username);
        Ok(new_token)
    }

    /// Returns true exactly when `validate` would succeed
    pub fn is_token_valid(&self, token: &str) -> bool {
        match self.validate(token) {
            Ok(_) => true,
            Err(e) => {
                debug!("Token is not valid: {}", e);
                false
            }
        }
    }

    /// Issuer name embedded in every token
    pub fn application_name(&self) -> &str {
        &self.config.application_name
    }

    /// Lifetime given to newly generated tokens
    pub fn expiration(&self) -> Duration {
        self.config.expiration
    }

    /// Number of entries currently in the revocation set
    pub fn revoked_count(&self) -> usize {
        self.revocation_store.len()
    }

    /// The revocation store backing this service
    pub fn revocation_store(&self) -> &R {
        &self.revocation_store
    }

    /// Verifies signature, structure and issuer, without expiry or revocation
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("Token verification failed: {}", e);
                TokenError::InvalidSignature
            })
    }
}

/// SHA-256 digest of a token string, hex encoded
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn ensure_present(field: &str, value: &str) -> Result<(), TokenError> {
    if value.trim().is_empty() {
        debug!("Rejected blank {}", field);
        return Err(TokenError::invalid_argument(field));
    }
    Ok(())
}
