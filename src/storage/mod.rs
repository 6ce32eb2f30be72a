//! Record store
//!
//! [`LinkRepository`] is the only way services touch persisted links. Both
//! backends enforce short-code uniqueness themselves, so a racing insert of
//! the same code fails with `DuplicateCode` instead of overwriting.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStorage;
pub use models::{NewShortUrl, ShortUrlRecord};

#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert a record and return its id
    ///
    /// Fails with `DuplicateCode` if the short code is already stored.
    async fn create(&self, link: NewShortUrl) -> Result<i32>;

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrlRecord>>;

    /// Atomically add one to the record's visit count
    async fn increment_visit(&self, id: i32) -> Result<()>;

    /// Remove a record; returns whether a row was deleted
    async fn delete(&self, id: i32) -> Result<bool>;

    /// Delete every record with `expires_at < now`, returning how many went
    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64>;

    async fn count(&self) -> Result<u64>;

    fn backend_name(&self) -> &str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// Open the backend named by `database_url`
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn LinkRepository>> {
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;

        if backend_type == "memory" {
            return Ok(Arc::new(MemoryStorage::new()));
        }

        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
