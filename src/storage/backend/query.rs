//! Read operations for SeaOrmStorage

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::{debug, error};

use super::SeaOrmStorage;
use super::converters::model_to_record;
use super::retry;
use crate::errors::{Result, TinylinkError};
use crate::storage::ShortUrlRecord;

use migration::entities::short_url;

impl SeaOrmStorage {
    pub async fn get(&self, code: &str) -> Result<Option<ShortUrlRecord>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get({})", code), self.retry_config, || async move {
            short_url::Entity::find()
                .filter(short_url::Column::ShortCode.eq(code))
                .one(db)
                .await
        })
        .await
        .map_err(|e| {
            error!("Lookup of '{}' failed after retries: {}", code, e);
            TinylinkError::database_operation(format!("Failed to look up '{}': {}", code, e))
        })?;

        debug!("Lookup '{}': found={}", code, model.is_some());
        Ok(model.map(model_to_record))
    }

    pub async fn count_links(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count", self.retry_config, || async move {
            short_url::Entity::find().count(db).await
        })
        .await
        .map_err(|e| TinylinkError::database_operation(format!("Failed to count links: {}", e)))
    }
}
