//! Background removal of expired records

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::SweeperConfig;
use crate::errors::Result;
use crate::storage::LinkRepository;

pub struct ExpirySweeper {
    repo: Arc<dyn LinkRepository>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(repo: Arc<dyn LinkRepository>, config: &SweeperConfig) -> Self {
        Self {
            repo,
            interval: Duration::from_secs(config.interval_secs),
        }
    }

    /// Delete every record whose expiry is strictly before now
    pub async fn run_once(&self) -> Result<u64> {
        let removed = self.repo.sweep_expired(Utc::now()).await?;
        debug!("Expiry sweep removed {} records", removed);
        Ok(removed)
    }

    /// Run sweeps on a fixed interval; `None` when the interval is zero
    pub fn spawn(self) -> Option<JoinHandle<()>> {
        if self.interval.is_zero() {
            info!("Expiry sweeper disabled");
            return None;
        }

        info!("Expiry sweeper running every {:?}", self.interval);
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // first tick fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    error!("Expiry sweep failed: {}", e);
                }
            }
        }))
    }
}
