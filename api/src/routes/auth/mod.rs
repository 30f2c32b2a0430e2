//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints including:
//! - Registration and login, which mint tokens
//! - Token refresh and invalidation for the bearer of a token
//! - Inspection of the caller's own token

pub mod info;
pub mod invalidate;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

pub use info::{auth_info, login_info, register_info};
pub use invalidate::invalidate_token;
pub use login::login;
pub use me::current_session;
pub use refresh::refresh_token;
pub use register::register;
