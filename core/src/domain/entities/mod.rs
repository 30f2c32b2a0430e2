//! Domain entities representing core business objects.

pub mod token;

// Re-export commonly used types
pub use token::{
    is_reserved_claim, Claims, Metadata, TokenData, REGISTERED_CLAIMS, RESERVED_CLAIMS,
};
