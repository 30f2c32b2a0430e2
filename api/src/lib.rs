//! # AuthGate API
//!
//! HTTP surface for the AuthGate token lifecycle service: identity endpoints
//! that mint tokens, the bearer-token gate, and session refresh/invalidate.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod telemetry;
