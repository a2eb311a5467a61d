// src/main.rs
mod avatar;
mod clipboard;
mod config;
mod effects;
mod handlers;
mod models;
mod poller;
mod render;
mod status_api;
mod utils;

use actix_web::{ web, App, HttpServer };
use env_logger::Env;
use governor::RateLimiter;
use std::sync::Arc;
use crate::config::Config;
use crate::handlers::status::RefreshLimiter;
use crate::poller::{ start_polling_task, StatusPoller };
use crate::status_api::HttpStatusSource;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env may carry RUST_LOG, so it is loaded before the logger.
    dotenv::dotenv().ok();

    env_logger::init_from_env(Env::default().default_filter_or("debug"));

    let config = Config::from_env();
    let bind = config.bind();

    let source = HttpStatusSource::new(
        config.status_api_base.clone(),
        config.status_api_version,
        config.request_timeout(),
    ).map_err(|e| {
        log::error!("Failed to build status client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let refresh_rate_limiter: web::Data<RefreshLimiter> =
        web::Data::new(RateLimiter::keyed(config.refresh_quota()));

    info!(
        "Watching {} every {}s via {} (API v{})",
        config.server_address,
        config.poll_interval().as_secs(),
        config.status_api_base,
        config.status_api_version.path_segment()
    );

    let poller = Arc::new(StatusPoller::new(config, source));
    start_polling_task(poller.clone());
    let poller = web::Data::from(poller);

    info!("Starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(poller.clone())
            .app_data(refresh_rate_limiter.clone())
            .route("/", web::get().to(handlers::status::page::<HttpStatusSource>))
            .route("/api/status", web::get().to(handlers::status::get_status::<HttpStatusSource>))
            .route("/api/refresh", web::post().to(handlers::status::refresh::<HttpStatusSource>))
            .route("/health", web::get().to(handlers::index::health))
    })
        .bind(&bind)?
        .run().await
}
