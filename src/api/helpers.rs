//! Response builders shared by the handlers

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;
use tracing::error;

use super::types::ErrorResponse;
use crate::errors::TinylinkError;

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// Map a service error to its status and `{error}` body
///
/// Internal failures are logged and answered with a generic message.
pub fn error_response(err: &TinylinkError) -> HttpResponse {
    let message = if err.is_client_error() {
        err.message().to_string()
    } else {
        error!("{} {}", err.code(), err);
        "Internal server error".to_string()
    };

    json_response(err.http_status(), &ErrorResponse { error: message })
}

/// Malformed JSON bodies answer 400 with the same `{error}` shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            let response = json_response(
                StatusCode::BAD_REQUEST,
                &ErrorResponse {
                    error: format!("Invalid request body: {}", err),
                },
            );
            error::InternalError::from_response(err, response).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_keeps_message() {
        let resp = error_response(&TinylinkError::invalid_code("bad code"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_status() {
        let resp = error_response(&TinylinkError::database_operation("disk full"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
