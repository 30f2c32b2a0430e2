//! Token lifecycle error taxonomy

use thiserror::Error;

/// Token-related errors
///
/// The first four variants are policy failures a caller can branch on.
/// `GenerationFailed` is an internal signing failure and never the result of
/// client input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid argument: {field} must not be empty")]
    InvalidArgument { field: String },

    #[error("Invalid token signature or format")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Shorthand for an `InvalidArgument` on the given field
    pub fn invalid_argument(field: impl Into<String>) -> Self {
        TokenError::InvalidArgument { field: field.into() }
    }

    /// True for every failure that should surface as "unauthorized"
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, TokenError::GenerationFailed)
    }

    /// Stable machine-readable code, for logs
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Revoked => "TOKEN_REVOKED",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
