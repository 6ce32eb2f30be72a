//! `POST /api/shorten`

use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::http::StatusCode;
use actix_web::middleware::Condition;
use actix_web::{Responder, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, trace};

use crate::api::helpers::{error_response, json_response};
use crate::api::types::{ShortenRequest, ShortenResponse};
use crate::config::RateLimitConfig;
use crate::errors::{Result, TinylinkError};
use crate::services::LinkService;

/// Per-IP token bucket for link creation
///
/// Built once per server so every worker draws from the same buckets.
#[derive(Clone)]
pub struct ShortenRateLimit {
    enabled: bool,
    config: GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>,
}

impl ShortenRateLimit {
    pub fn from_config(rate_limit: &RateLimitConfig) -> Result<Self> {
        let defaults = RateLimitConfig::default();
        let (seconds, burst) = if rate_limit.enabled {
            (rate_limit.seconds_per_request, rate_limit.burst_size)
        } else {
            (defaults.seconds_per_request, defaults.burst_size)
        };

        let config = GovernorConfigBuilder::default()
            .seconds_per_request(seconds)
            .burst_size(burst)
            .finish()
            .ok_or_else(|| {
                TinylinkError::config(format!(
                    "Invalid rate limit: {} seconds per request, burst {}",
                    seconds, burst
                ))
            })?;

        debug!(
            "Shorten rate limit {}: 1 req / {}s, burst {}",
            if rate_limit.enabled { "enabled" } else { "disabled" },
            seconds,
            burst
        );
        Ok(Self {
            enabled: rate_limit.enabled,
            config,
        })
    }
}

pub struct ShortenService;

impl ShortenService {
    pub async fn shorten(
        body: web::Json<ShortenRequest>,
        links: web::Data<LinkService>,
    ) -> impl Responder {
        let request = body.into_inner();
        trace!("Shorten request for {:?}", request.url);

        match links
            .submit(&request.url, request.custom_code.as_deref())
            .await
        {
            Ok(record) => json_response(
                StatusCode::CREATED,
                &ShortenResponse {
                    short_url: links.short_url(&record.short_code),
                    original_url: record.original_url,
                    short_code: record.short_code,
                    expires_at: record.expires_at,
                },
            ),
            Err(e) => error_response(&e),
        }
    }
}

pub fn shorten_routes(limit: &ShortenRateLimit) -> actix_web::Resource {
    web::resource("/api/shorten").route(
        web::post()
            .to(ShortenService::shorten)
            .wrap(Condition::new(limit.enabled, Governor::new(&limit.config))),
    )
}
