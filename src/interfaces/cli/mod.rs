//! Administrative commands run against the configured store

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::runtime::lifetime::startup::prepare_services;

/// Run one non-server command to completion
pub async fn run_cli_command(cmd: Commands, config: &AppConfig) -> Result<()> {
    // Generating a config must work without a reachable database
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return commands::generate_config(output_path, force);
    }

    let services = prepare_services(config).await?;
    match cmd {
        Commands::Cleanup => commands::cleanup(&services.sweeper).await,
        Commands::Shorten { url, code } => {
            commands::shorten(&services.link_service, &url, code.as_deref()).await
        }
        Commands::Stats { code } => {
            commands::stats(&services.link_service, services.storage.as_ref(), &code).await
        }
        Commands::Serve | Commands::Config { .. } => Ok(()),
    }
}
