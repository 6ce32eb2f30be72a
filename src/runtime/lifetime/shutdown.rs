use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Wait for Ctrl+C, then stop background work
pub async fn listen_for_shutdown(sweeper: Option<JoinHandle<()>>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
        info!("Expiry sweeper stopped");
    }
}
