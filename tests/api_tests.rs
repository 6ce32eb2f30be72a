//! HTTP API tests
//!
//! Full route table over an in-memory store.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::json;

use tinylink::api;
use tinylink::api::services::ShortenRateLimit;
use tinylink::api::types::{ErrorResponse, ServiceInfo, ShortenResponse, StatsResponse};
use tinylink::config::{RateLimitConfig, ShortenerConfig};
use tinylink::services::{LinkService, RedirectService};
use tinylink::storage::{LinkRepository, MemoryStorage};

fn shortener_config() -> ShortenerConfig {
    ShortenerConfig {
        base_url: "https://ti.ny/".to_string(),
        ..ShortenerConfig::default()
    }
}

fn rate_limit(enabled: bool) -> ShortenRateLimit {
    ShortenRateLimit::from_config(&RateLimitConfig {
        enabled,
        seconds_per_request: 60,
        burst_size: 2,
    })
    .expect("valid rate limit")
}

/// Middleware rejections surface as errors rather than responses
fn status_of<B>(result: Result<ServiceResponse<B>, actix_web::Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.status(),
        Err(e) => e.as_response_error().status_code(),
    }
}

macro_rules! test_app {
    ($repo:expr, $limit:expr) => {{
        let repo: Arc<dyn LinkRepository> = $repo;
        let limit = $limit;
        test::init_service(
            App::new()
                .app_data(web::Data::new(LinkService::new(
                    repo.clone(),
                    &shortener_config(),
                )))
                .app_data(web::Data::new(RedirectService::new(repo.clone())))
                .configure(|cfg| api::configure(cfg, &limit)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_index_banner() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(false));
    let info: ServiceInfo =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(info.name, "tinylink");
    assert!(!info.version.is_empty());
}

#[actix_web::test]
async fn test_shorten_redirect_stats_flow() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(false));

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/shorten")
            .set_json(json!({ "url": "https://example.com/page" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ShortenResponse = test::read_body_json(resp).await;
    assert_eq!(created.short_code.len(), 6);
    assert_eq!(
        created.short_url,
        format!("https://ti.ny/{}", created.short_code)
    );
    assert_eq!(created.original_url, "https://example.com/page");
    assert!(created.expires_at.is_some());

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/{}", created.short_code))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/page"
    );

    let stats: StatsResponse = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(&format!("/stats/{}", created.short_code))
            .to_request(),
    )
    .await;
    assert_eq!(stats.visit_count, 1);
    assert_eq!(stats.short_url, created.short_url);
    assert_eq!(stats.expires_at, created.expires_at);
}

#[actix_web::test]
async fn test_shorten_with_custom_code() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(false));

    let request = || {
        TestRequest::post()
            .uri("/api/shorten")
            .set_json(json!({ "url": "https://example.com", "custom_code": "mine" }))
            .to_request()
    };

    let resp = test::call_service(&app, request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ShortenResponse = test::read_body_json(resp).await;
    assert_eq!(created.short_code, "mine");

    let resp = test::call_service(&app, request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.contains("already in use"));
}

#[actix_web::test]
async fn test_shorten_rejects_bad_input() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(false));

    for payload in [
        json!({ "url": "not a url" }),
        json!({ "url": "javascript:alert(1)" }),
        json!({ "url": "https://example.com", "custom_code": "a b/c" }),
    ] {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/shorten")
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
    }
}

#[actix_web::test]
async fn test_shorten_malformed_json() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(false));

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/shorten")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"url\":")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid request body"));
}

#[actix_web::test]
async fn test_unknown_code_and_stats() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(false));

    let resp = test::call_service(&app, TestRequest::get().uri("/nope42").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/stats/nope42").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_shorten_rate_limited_per_ip() {
    let app = test_app!(Arc::new(MemoryStorage::new()), rate_limit(true));

    let request = |ip: &str| {
        TestRequest::post()
            .uri("/api/shorten")
            .peer_addr(format!("{}:40000", ip).parse().unwrap())
            .set_json(json!({ "url": "https://example.com" }))
            .to_request()
    };

    for _ in 0..2 {
        let result = test::try_call_service(&app, request("10.0.0.1")).await;
        assert_eq!(status_of(result), StatusCode::CREATED);
    }
    let result = test::try_call_service(&app, request("10.0.0.1")).await;
    assert_eq!(status_of(result), StatusCode::TOO_MANY_REQUESTS);

    let result = test::try_call_service(&app, request("10.0.0.2")).await;
    assert_eq!(status_of(result), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_shorten_rejects_control_characters() {
    let repo: Arc<dyn LinkRepository> = Arc::new(MemoryStorage::new());
    let app = test_app!(repo.clone(), rate_limit(false));

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/shorten")
            .set_json(json!({ "url": "https://example.com/a\nb", "custom_code": "ctrl" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.contains("control characters"));
    assert_eq!(repo.count().await.unwrap(), 0);

    let resp = test::call_service(&app, TestRequest::get().uri("/ctrl").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_head_redirects_without_counting() {
    let repo: Arc<dyn LinkRepository> = Arc::new(MemoryStorage::new());
    let app = test_app!(repo.clone(), rate_limit(false));

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/shorten")
            .set_json(json!({ "url": "https://example.com/head", "custom_code": "peek" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            TestRequest::default()
                .method(actix_web::http::Method::HEAD)
                .uri("/peek")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap(),
            "https://example.com/head"
        );
    }

    let resp = test::call_service(
        &app,
        TestRequest::default()
            .method(actix_web::http::Method::HEAD)
            .uri("/missing")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let stats: StatsResponse = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/stats/peek").to_request(),
    )
    .await;
    assert_eq!(stats.visit_count, 0);

    test::call_service(&app, TestRequest::get().uri("/peek").to_request()).await;
    assert_eq!(repo.find_by_code("peek").await.unwrap().unwrap().visit_count, 1);
}
