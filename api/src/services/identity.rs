//! Mock identity provider
//!
//! Registration and login accept any well-formed input: there is no user
//! store, so every successful call simply mints a token through the token
//! service.

use ag_core::{Metadata, RevocationStore, TokenError, TokenService};
use ag_shared::validation::{Validate, ValidationErrors};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dto::auth::{LoginData, LoginRequest, RegistrationData, RegistrationRequest};

/// User id assigned to every registered user
pub const MOCK_USER_ID: i64 = 12345;

/// Email embedded in tokens minted by login
pub const LOGIN_EMAIL: &str = "user@example.com";

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Validation failed: {}", .0.summary())]
    Validation(ValidationErrors),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub struct IdentityService<R: RevocationStore> {
    token_service: Arc<TokenService<R>>,
}

impl<R: RevocationStore> IdentityService<R> {
    pub fn new(token_service: Arc<TokenService<R>>) -> Self {
        Self { token_service }
    }

    /// Register a new user and issue their first token
    pub fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationData, IdentityError> {
        let today = Utc::now().date_naive();
        self.register_on(request, today)
    }

    /// Register as if the current date were `today`
    pub fn register_on(
        &self,
        request: &RegistrationRequest,
        today: NaiveDate,
    ) -> Result<RegistrationData, IdentityError> {
        info!("Registration requested for {}", request.username);

        request.validate_as_of(today).map_err(|errors| {
            warn!("Registration rejected: {}", errors.summary());
            IdentityError::Validation(errors)
        })?;

        let mut metadata = Metadata::new();
        metadata.insert("userId".to_string(), json!(MOCK_USER_ID));
        metadata.insert("registeredAt".to_string(), json!(today.to_string()));
        if let Some(phone) = request.phone() {
            metadata.insert("phoneNumber".to_string(), json!(phone));
        }

        let token = self
            .token_service
            .generate(&request.username, &request.email, Some(metadata))?;

        info!("User {} registered", request.username);
        Ok(RegistrationData {
            user_id: MOCK_USER_ID,
            username: request.username.clone(),
            email: request.email.clone(),
            registered_at: today,
            token,
        })
    }

    /// Authenticate a user and issue a token
    pub fn login(&self, request: &LoginRequest) -> Result<LoginData, IdentityError> {
        debug!("Login requested for {}", request.username);

        request.validate().map_err(|errors| {
            warn!("Login rejected: {}", errors.summary());
            IdentityError::Validation(errors)
        })?;

        let mut metadata = Metadata::new();
        metadata.insert(
            "lastLogin".to_string(),
            json!(Utc::now().date_naive().to_string()),
        );

        let token = self
            .token_service
            .generate(&request.username, LOGIN_EMAIL, Some(metadata))?;

        info!("User {} logged in", request.username);
        Ok(LoginData {
            token,
            username: request.username.clone(),
            expires_in: self.token_service.expiration().num_seconds(),
        })
    }
}
