//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::{LinkRepository, NewShortUrl, ShortUrlRecord};
use crate::config::DatabaseConfig;
use crate::errors::{Result, TinylinkError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, new_link_to_active_model};

/// Infer the backend type from a database URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(TinylinkError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://, memory://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// Connect, run migrations and return a ready store
    pub async fn new(config: &DatabaseConfig, backend_name: &str) -> Result<Self> {
        if config.database_url.is_empty() {
            return Err(TinylinkError::database_config("database_url is not set"));
        }

        let retry_config = retry::RetryConfig {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        };

        let db = if backend_name == "sqlite" {
            connect_sqlite(&config.database_url).await?
        } else {
            connect_generic(&config.database_url, backend_name, config.pool_size).await?
        };

        run_migrations(&db).await?;

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        info!("{} storage initialized", storage.backend_name.to_uppercase());
        Ok(storage)
    }
}

#[async_trait]
impl LinkRepository for SeaOrmStorage {
    async fn create(&self, link: NewShortUrl) -> Result<i32> {
        self.insert(link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrlRecord>> {
        self.get(code).await
    }

    async fn increment_visit(&self, id: i32) -> Result<()> {
        self.bump_visit_count(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        self.remove(id).await
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        self.remove_expired(now).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_links().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
