//! Link submission and lookup
//!
//! Validation happens before any write, and a record is created with a
//! single insert.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use super::code_allocator::CodeAllocator;
use crate::config::ShortenerConfig;
use crate::errors::{Result, TinylinkError};
use crate::storage::{LinkRepository, NewShortUrl, ShortUrlRecord};
use crate::utils::url_validator::validate_url;

pub struct LinkService {
    repo: Arc<dyn LinkRepository>,
    allocator: CodeAllocator,
    retention_days: u32,
    base_url: String,
}

impl LinkService {
    pub fn new(repo: Arc<dyn LinkRepository>, config: &ShortenerConfig) -> Self {
        let allocator = CodeAllocator::new(repo.clone(), config);
        Self::with_allocator(repo, allocator, config)
    }

    pub fn with_allocator(
        repo: Arc<dyn LinkRepository>,
        allocator: CodeAllocator,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            repo,
            allocator,
            retention_days: config.retention_days,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Shorten `original_url`, optionally under `custom_code`
    ///
    /// A generated code that loses an insert race is re-allocated once; a
    /// custom code that loses one is reported as in use.
    pub async fn submit(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<ShortUrlRecord> {
        let original_url = original_url.trim();
        validate_url(original_url).map_err(|e| TinylinkError::invalid_url(e.to_string()))?;

        let custom_code = custom_code.filter(|c| !c.is_empty());
        let code = self.allocator.allocate(custom_code).await?;

        let created_at = Utc::now();
        let expires_at = self.expiry_from(created_at);

        match self.insert(original_url, &code, created_at, expires_at).await {
            Err(TinylinkError::DuplicateCode(_)) if custom_code.is_none() => {
                warn!("Generated code '{}' was taken concurrently, retrying", code);
                let code = self.allocator.allocate(None).await?;
                self.insert(original_url, &code, created_at, expires_at)
                    .await
                    .map_err(duplicate_as_in_use)
            }
            other => other.map_err(duplicate_as_in_use),
        }
    }

    /// Metadata for a code; does not count as a visit
    pub async fn stats(&self, code: &str) -> Result<ShortUrlRecord> {
        let record = self
            .repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| TinylinkError::not_found(format!("Short code '{}' not found", code)))?;

        if record.is_expired_at(Utc::now()) {
            return Err(TinylinkError::expired(format!(
                "Short code '{}' has expired",
                code
            )));
        }

        Ok(record)
    }

    /// Full short link for `code`
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    fn expiry_from(&self, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        (self.retention_days > 0)
            .then(|| created_at + Duration::days(i64::from(self.retention_days)))
    }

    async fn insert(
        &self,
        original_url: &str,
        code: &str,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortUrlRecord> {
        let id = self
            .repo
            .create(NewShortUrl {
                original_url: original_url.to_string(),
                short_code: code.to_string(),
                created_at,
                expires_at,
            })
            .await?;

        info!("Shortened '{}' as '{}'", original_url, code);
        Ok(ShortUrlRecord {
            id,
            original_url: original_url.to_string(),
            short_code: code.to_string(),
            created_at,
            expires_at,
            visit_count: 0,
        })
    }
}

fn duplicate_as_in_use(err: TinylinkError) -> TinylinkError {
    match err {
        TinylinkError::DuplicateCode(msg) => TinylinkError::CodeInUse(msg),
        other => other,
    }
}
