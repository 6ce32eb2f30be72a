//! In-memory storage backend (`memory://`)
//!
//! Records live in a DashMap keyed by short code, so the map entry itself is
//! the uniqueness constraint. Nothing survives a restart.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use super::{LinkRepository, NewShortUrl, ShortUrlRecord};
use crate::errors::{Result, TinylinkError};

pub struct MemoryStorage {
    records: DashMap<String, ShortUrlRecord>,
    codes_by_id: DashMap<i32, String>,
    next_id: AtomicI32,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            codes_by_id: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl LinkRepository for MemoryStorage {
    async fn create(&self, link: NewShortUrl) -> Result<i32> {
        match self.records.entry(link.short_code.clone()) {
            Entry::Occupied(_) => Err(TinylinkError::duplicate_code(format!(
                "Short code '{}' already exists",
                link.short_code
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(ShortUrlRecord {
                    id,
                    original_url: link.original_url,
                    short_code: link.short_code.clone(),
                    created_at: link.created_at,
                    expires_at: link.expires_at,
                    visit_count: 0,
                });
                self.codes_by_id.insert(id, link.short_code);
                Ok(id)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrlRecord>> {
        Ok(self.records.get(code).map(|r| r.value().clone()))
    }

    async fn increment_visit(&self, id: i32) -> Result<()> {
        let code = self
            .codes_by_id
            .get(&id)
            .map(|c| c.value().clone())
            .ok_or_else(|| TinylinkError::not_found(format!("Record #{} not found", id)))?;

        // the code may have been deleted and re-created under a new id
        match self.records.get_mut(&code) {
            Some(mut record) if record.id == id => {
                record.visit_count += 1;
                Ok(())
            }
            _ => Err(TinylinkError::not_found(format!("Record #{} not found", id))),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let Some((_, code)) = self.codes_by_id.remove(&id) else {
            return Ok(false);
        };
        Ok(self.records.remove(&code).is_some())
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut removed_ids = Vec::new();
        self.records.retain(|_, record| {
            let expired = record.expires_at.is_some_and(|exp| exp < now);
            if expired {
                removed_ids.push(record.id);
            }
            !expired
        });

        for id in &removed_ids {
            self.codes_by_id.remove(id);
        }

        info!("Removed {} expired short URLs", removed_ids.len());
        Ok(removed_ids.len() as u64)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
