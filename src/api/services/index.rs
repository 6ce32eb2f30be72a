//! `GET /`

use actix_web::http::StatusCode;
use actix_web::{Responder, web};

use crate::api::helpers::json_response;
use crate::api::types::ServiceInfo;

pub async fn service_info() -> impl Responder {
    json_response(
        StatusCode::OK,
        &ServiceInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

pub fn index_routes() -> actix_web::Resource {
    web::resource("/").route(web::get().to(service_info))
}
