//! Bearer token gate for protected endpoints.
//!
//! The middleware extracts the token from the `Authorization` header,
//! validates it with the `TokenService` held in `AppState`, and injects the
//! decoded token into the request as an `AuthContext`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use ag_core::TokenData;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use tracing::{debug, error, warn};

use crate::app::AppState;
use crate::handlers::error::{
    internal_error_response, into_actix_error, token_error_response, unauthorized_response,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller, available to handlers behind `TokenAuth`
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Decoded content of the presented token
    pub data: TokenData,
    /// The raw token, needed to refresh or invalidate it
    pub token: String,
}

impl AuthContext {
    pub fn username(&self) -> &str {
        &self.data.username
    }
}

/// Token authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAuth;

impl TokenAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Token authentication middleware service
pub struct TokenAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    warn!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(reject(req, unauthorized_response()));
                }
            };

            let state = match req.app_data::<web::Data<AppState>>().cloned() {
                Some(state) => state,
                None => {
                    error!("Token service is not registered with the application");
                    return Ok(reject(req, internal_error_response()));
                }
            };

            let data = match state.token_service.validate(&token) {
                Ok(data) => data,
                Err(e) => return Ok(reject(req, token_error_response(&e))),
            };

            debug!(path = %req.path(), "Authenticated request for {}", data.username);
            req.extensions_mut().insert(AuthContext { data, token });

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuit the request with a prepared response
fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(response).map_into_right_body()
}

/// Extracts a non-empty Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for handlers mounted behind `TokenAuth`
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| into_actix_error(unauthorized_response()));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_lowercase = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_lowercase), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
