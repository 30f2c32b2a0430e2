//! Application services composed on top of the token service

pub mod identity;

pub use identity::{IdentityError, IdentityService, LOGIN_EMAIL, MOCK_USER_ID};
