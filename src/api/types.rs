//! Request and response bodies for the public API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub short_code: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}
