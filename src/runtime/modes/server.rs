//! Server mode
//!
//! Configures and starts the HTTP server with all routes, plus the
//! background expiry sweeper.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api;
use crate::api::middleware::TimingMiddleware;
use crate::api::services::ShortenRateLimit;
use crate::config::AppConfig;
use crate::runtime::lifetime;

/// Run the HTTP server until it stops or Ctrl+C arrives
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let context = lifetime::startup::prepare_services(config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })
        .context("Failed to prepare services")?;

    let rate_limit = ShortenRateLimit::from_config(&config.rate_limit)
        .context("Failed to build rate limiter")?;

    let link_service = web::Data::new(context.link_service);
    let redirect_service = web::Data::new(context.redirect_service);
    let sweeper = context.sweeper.spawn();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(link_service.clone())
            .app_data(redirect_service.clone())
            .configure(|cfg| api::configure(cfg, &rate_limit))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    let handle = server.handle();
    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(sweeper) => {
            handle.stop(true).await;
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
