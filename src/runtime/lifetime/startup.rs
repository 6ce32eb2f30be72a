use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{ExpirySweeper, LinkService, RedirectService};
use crate::storage::{LinkRepository, StorageFactory};

/// Everything a mode needs, wired to one shared store
pub struct ServiceContext {
    pub storage: Arc<dyn LinkRepository>,
    pub link_service: LinkService,
    pub redirect_service: RedirectService,
    pub sweeper: ExpirySweeper,
}

/// Open the store and build the services on top of it
pub async fn prepare_services(config: &AppConfig) -> Result<ServiceContext> {
    let start_time = Instant::now();
    debug!("Preparing storage and services...");

    let storage = StorageFactory::create(&config.database).await?;
    info!(
        "Using storage backend: {} ({} links)",
        storage.backend_name(),
        storage.count().await?
    );

    let context = ServiceContext {
        link_service: LinkService::new(storage.clone(), &config.shortener),
        redirect_service: RedirectService::new(storage.clone()),
        sweeper: ExpirySweeper::new(storage.clone(), &config.sweeper),
        storage,
    };

    debug!("Services ready in {:.2?}", start_time.elapsed());
    Ok(context)
}
