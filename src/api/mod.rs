//! HTTP surface
//!
//! Handlers pull [`LinkService`](crate::services::LinkService) and
//! [`RedirectService`](crate::services::RedirectService) out of app data and
//! translate [`TinylinkError`](crate::errors::TinylinkError) into responses.

pub mod helpers;
pub mod middleware;
pub mod services;
pub mod types;

use actix_web::web;

use services::{ShortenRateLimit, index_routes, redirect_routes, shorten_routes, stats_routes};

/// Register every route; the catch-all redirect goes last
pub fn configure(cfg: &mut web::ServiceConfig, rate_limit: &ShortenRateLimit) {
    cfg.app_data(helpers::json_config())
        .service(index_routes())
        .service(shorten_routes(rate_limit))
        .service(stats_routes())
        .service(redirect_routes());
}
