//! Integration tests for the identity and info endpoints

mod common;

use actix_web::{http::StatusCode, test};
use ag_api::app::create_app;
use serde_json::{json, Value};

use common::test_state;

fn registration_body() -> Value {
    json!({
        "username": "testuser",
        "password": "Test123!@",
        "email": "test@example.com",
        "birthday": "2000-01-01",
        "phoneNumber": "+380501234567"
    })
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[actix_web::test]
async fn test_info_endpoints() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "running");

    for uri in ["/api/auth", "/api/auth/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Auth API");
    }
}

#[actix_web::test]
async fn test_get_on_post_endpoints_returns_example() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/api/auth/register").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    assert_eq!(body["method"], "POST");
    assert_eq!(body["example"]["username"], "testuser");

    let req = test::TestRequest::get().uri("/api/auth/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["url"], "/api/auth/login");
}

#[actix_web::test]
async fn test_register_success() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["userId"], 12345);
    assert_eq!(body["data"]["username"], "testuser");
    assert_eq!(body["data"]["email"], "test@example.com");

    let token = body["data"]["token"].as_str().unwrap();
    let data = state.token_service.validate(token).unwrap();
    assert_eq!(data.metadata["userId"], json!(12345));
    assert_eq!(data.metadata["phoneNumber"], json!("+380501234567"));
    assert_eq!(data.metadata["registeredAt"], body["data"]["registeredAt"]);
}

#[actix_web::test]
async fn test_register_validation_failure() {
    let app = test::init_service(create_app(test_state())).await;

    let mut body = registration_body();
    body["password"] = json!("weak");
    body["birthday"] = json!("2099-01-01");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Validation failed:"));
    assert!(message.contains("password:"));
    assert!(message.contains("Birthday cannot be in the future"));
}

#[actix_web::test]
async fn test_register_malformed_json() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_login_success() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "testuser", "password": "Test123!@"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "testuser");
    assert_eq!(body["data"]["expiresIn"], 86400);

    let token = body["data"]["token"].as_str().unwrap();
    let data = state.token_service.validate(token).unwrap();
    assert_eq!(data.email, "user@example.com");
    assert!(data.metadata.contains_key("lastLogin"));
}

#[actix_web::test]
async fn test_login_failure_is_unauthorized() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "x", "password": "short"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_unknown_route() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
