//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Claims set by the token service; caller metadata can never override them
pub const RESERVED_CLAIMS: [&str; 5] = [
    "username",
    "email",
    "applicationName",
    "createdAt",
    "expiresAt",
];

/// Registered JWT claims, never surfaced as metadata
pub const REGISTERED_CLAIMS: [&str; 7] = ["sub", "iat", "exp", "iss", "jti", "nbf", "aud"];

/// Caller-supplied extra claims
pub type Metadata = Map<String, Value>;

/// Returns true if `key` is owned by the token service
pub fn is_reserved_claim(key: &str) -> bool {
    RESERVED_CLAIMS.contains(&key) || REGISTERED_CLAIMS.contains(&key)
}

/// Claims structure for the JWT payload
///
/// Serialized as a single flat JSON object: the named fields first, then every
/// metadata entry at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the username)
    pub sub: String,

    /// Issued at, unix seconds
    pub iat: i64,

    /// Expiration, unix seconds
    pub exp: i64,

    /// Issuer (the application name)
    pub iss: String,

    /// JWT ID, unique per issued token
    pub jti: String,

    pub username: String,

    pub email: String,

    #[serde(rename = "applicationName")]
    pub application_name: String,

    /// Issue instant with sub-second precision
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Authoritative expiry instant
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,

    #[serde(flatten)]
    pub metadata: Metadata,
}

impl Claims {
    /// Creates the claim set for a new token
    ///
    /// Metadata entries whose keys collide with reserved or registered claims
    /// are dropped. Returns `None` when the expiry instant is not representable.
    pub fn new(
        username: &str,
        email: &str,
        application_name: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        metadata: Option<Metadata>,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(lifetime)?;
        let metadata = metadata
            .unwrap_or_default()
            .into_iter()
            .filter(|(key, _)| !is_reserved_claim(key))
            .collect();

        Some(Self {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: application_name.to_string(),
            jti: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            application_name: application_name.to_string(),
            created_at: issued_at,
            expires_at,
            metadata,
        })
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Converts verified claims into the data handed back to callers
    pub fn into_token_data(self) -> TokenData {
        let metadata = self
            .metadata
            .into_iter()
            .filter(|(key, _)| !is_reserved_claim(key))
            .collect();

        TokenData {
            username: self.username,
            email: self.email,
            application_name: self.application_name,
            created_at: self.created_at,
            expires_at: self.expires_at,
            metadata,
        }
    }
}

/// Decoded content of a validated token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub username: String,
    pub email: String,
    pub application_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub metadata: Metadata,
}

impl TokenData {
    /// Seconds until expiry, zero once expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
