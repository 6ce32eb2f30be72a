//! Short code resolution

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::errors::{Result, TinylinkError};
use crate::storage::{LinkRepository, ShortUrlRecord};
use crate::utils::is_valid_slug;

pub struct RedirectService {
    repo: Arc<dyn LinkRepository>,
}

impl RedirectService {
    pub fn new(repo: Arc<dyn LinkRepository>) -> Self {
        Self { repo }
    }

    /// Resolve `code` to its original URL and count the visit
    ///
    /// An expired record is deleted on the way out. When two callers race on
    /// the same expired record only the one whose delete succeeds sees
    /// `Expired`; the other gets `NotFound`.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        let record = self.live_record(code).await?;
        self.repo.increment_visit(record.id).await?;
        Ok(record.original_url)
    }

    /// Same outcome as [`resolve`](Self::resolve) without counting a visit
    pub async fn peek(&self, code: &str) -> Result<String> {
        Ok(self.live_record(code).await?.original_url)
    }

    async fn live_record(&self, code: &str) -> Result<ShortUrlRecord> {
        if !is_valid_slug(code) {
            debug!("Rejected malformed short code: {:?}", code);
            return Err(not_found(code));
        }

        let record = self
            .repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        if record.is_expired_at(Utc::now()) {
            if !self.repo.delete(record.id).await? {
                return Err(not_found(code));
            }
            info!("Short code '{}' expired, record removed", code);
            return Err(TinylinkError::expired(format!(
                "Short code '{}' has expired",
                code
            )));
        }

        Ok(record)
    }
}

fn not_found(code: &str) -> TinylinkError {
    TinylinkError::not_found(format!("Short code '{}' not found", code))
}
