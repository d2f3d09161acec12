//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Token-gated routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("/topic/{topic}", web::get().to(posts::list_by_topic))
                    .route("/most-active/{topic}", web::get().to(posts::most_active))
                    .route("/{id}/like", web::post().to(posts::like))
                    .route("/{id}/dislike", web::post().to(posts::dislike))
                    .route("/{id}/comment", web::post().to(posts::comment)),
            ),
    );
}
