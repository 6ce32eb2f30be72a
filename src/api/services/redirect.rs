//! `GET /{code}` and `HEAD /{code}`

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, trace};

use crate::api::helpers::error_response;
use crate::errors::Result;
use crate::services::RedirectService;

pub struct RedirectHandler;

impl RedirectHandler {
    pub async fn handle_redirect(
        path: web::Path<String>,
        redirects: web::Data<RedirectService>,
    ) -> impl Responder {
        let code = path.into_inner();
        trace!("Redirect request for '{}'", code);

        found_or_error(&code, redirects.resolve(&code).await)
    }

    /// HEAD answers like GET but leaves the visit count alone
    pub async fn handle_head(
        path: web::Path<String>,
        redirects: web::Data<RedirectService>,
    ) -> impl Responder {
        let code = path.into_inner();
        trace!("HEAD request for '{}'", code);

        found_or_error(&code, redirects.peek(&code).await)
    }
}

fn found_or_error(code: &str, target: Result<String>) -> HttpResponse {
    match target {
        Ok(target) => HttpResponse::build(StatusCode::FOUND)
            .insert_header(("Location", target))
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .finish(),
        Err(e) => {
            debug!("Redirect for '{}' failed: {}", code, e);
            error_response(&e)
        }
    }
}

pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{code}")
        .route(web::get().to(RedirectHandler::handle_redirect))
        .route(web::head().to(RedirectHandler::handle_head))
}
