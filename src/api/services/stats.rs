//! `GET /stats/{code}`

use actix_web::http::StatusCode;
use actix_web::{Responder, web};

use crate::api::helpers::{error_response, json_response};
use crate::api::types::StatsResponse;
use crate::services::LinkService;

pub struct StatsService;

impl StatsService {
    pub async fn stats(path: web::Path<String>, links: web::Data<LinkService>) -> impl Responder {
        let code = path.into_inner();

        match links.stats(&code).await {
            Ok(record) => json_response(
                StatusCode::OK,
                &StatsResponse {
                    short_url: links.short_url(&record.short_code),
                    short_code: record.short_code,
                    original_url: record.original_url,
                    visit_count: record.visit_count,
                    created_at: record.created_at,
                    expires_at: record.expires_at,
                },
            ),
            Err(e) => error_response(&e),
        }
    }
}

pub fn stats_routes() -> actix_web::Resource {
    web::resource("/stats/{code}").route(web::get().to(StatsService::stats))
}
