use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short-code → URL mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrlRecord {
    pub id: i32,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    /// `None` means the link never expires
    pub expires_at: Option<DateTime<Utc>>,
    pub visit_count: u64,
}

impl ShortUrlRecord {
    /// A link is expired once `now` has reached `expires_at`
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Values needed to insert a record; the store assigns `id` and `visit_count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
