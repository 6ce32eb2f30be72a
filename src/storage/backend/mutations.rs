//! Write operations for SeaOrmStorage

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, ExprTrait, QueryFilter};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::new_link_to_active_model;
use super::retry;
use crate::errors::{Result, TinylinkError};
use crate::storage::NewShortUrl;

use migration::entities::short_url;

impl SeaOrmStorage {
    /// Single INSERT; the unique index on `short_code` decides races
    pub async fn insert(&self, link: NewShortUrl) -> Result<i32> {
        let db = &self.db;
        let link_ref = &link;

        let result = retry::with_retry(
            &format!("insert({})", link.short_code),
            self.retry_config,
            || async move {
                short_url::Entity::insert(new_link_to_active_model(link_ref))
                    .exec(db)
                    .await
            },
        )
        .await;

        match result {
            Ok(res) => {
                info!(
                    "Short URL created: {} -> {}",
                    link.short_code, link.original_url
                );
                Ok(res.last_insert_id)
            }
            Err(e) if retry::is_unique_violation(&e) => {
                debug!("Insert of '{}' hit the unique index", link.short_code);
                Err(TinylinkError::duplicate_code(format!(
                    "Short code '{}' already exists",
                    link.short_code
                )))
            }
            Err(e) => Err(TinylinkError::database_operation(format!(
                "Failed to insert '{}': {}",
                link.short_code, e
            ))),
        }
    }

    /// `visit_count = visit_count + 1` in one statement
    pub async fn bump_visit_count(&self, id: i32) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("increment_visit({})", id),
            self.retry_config,
            || async move {
                short_url::Entity::update_many()
                    .col_expr(
                        short_url::Column::VisitCount,
                        Expr::col(short_url::Column::VisitCount).add(Expr::val(1i64)),
                    )
                    .filter(short_url::Column::Id.eq(id))
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            TinylinkError::database_operation(format!(
                "Failed to increment visit count of #{}: {}",
                id, e
            ))
        })?;

        if result.rows_affected == 0 {
            return Err(TinylinkError::not_found(format!("Record #{} not found", id)));
        }
        Ok(())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let db = &self.db;

        let result = retry::with_retry(&format!("delete({})", id), self.retry_config, || async move {
            short_url::Entity::delete_by_id(id).exec(db).await
        })
        .await
        .map_err(|e| {
            TinylinkError::database_operation(format!("Failed to delete #{}: {}", id, e))
        })?;

        let deleted = result.rows_affected > 0;
        if deleted {
            info!("Short URL #{} deleted", id);
        }
        Ok(deleted)
    }

    /// NULL `expires_at` never compares less than `now`, so permanent links survive
    pub async fn remove_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let db = &self.db;

        let result = retry::with_retry("sweep_expired", self.retry_config, || async move {
            short_url::Entity::delete_many()
                .filter(short_url::Column::ExpiresAt.lt(now))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| {
            TinylinkError::database_operation(format!("Failed to delete expired links: {}", e))
        })?;

        info!("Removed {} expired short URLs", result.rows_affected);
        Ok(result.rows_affected)
    }
}
