//! # Pulse API Server
//!
//! Actix-web entry point for the post lifecycle service.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use pulse_core::ports::{PasswordService, TokenService};
use pulse_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Before config, so configuration warnings are recorded.
    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Pulse API Server on {}:{}",
        config.host,
        config.port
    );

    let (state, shutdown) = AppState::new(config.database.as_ref()).await?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    let result = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    tracing::info!("Server stopped, releasing resources");
    shutdown.run().await;

    result
}
