use actix_web::{web, HttpServer};
use ag_api::app::{create_app, AppState};
use ag_api::telemetry;
use ag_core::{
    InMemoryRevocationStore, RevocationCleanupConfig, RevocationCleanupService, TokenService,
    TokenServiceConfig,
};
use ag_shared::config::{AppConfig, Environment};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then the generic one fills the gaps
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging)?;

    info!("Starting AuthGate API Server ({})", config.environment);

    config.validate().context("Invalid configuration")?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }

    let store = InMemoryRevocationStore::new();
    let token_config = TokenServiceConfig::try_from(&config.auth.jwt)?;
    let token_service = Arc::new(TokenService::new(store.clone(), token_config)?);
    info!(
        "Token service ready - issuer: {}, lifetime: {}s",
        token_service.application_name(),
        token_service.expiration().num_seconds()
    );

    let cleanup = Arc::new(RevocationCleanupService::new(
        store,
        RevocationCleanupConfig::from(&config.auth.revocation),
    ));
    let _cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(token_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
