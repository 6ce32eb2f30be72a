use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use tinylink::cli::Cli;
use tinylink::config::AppConfig;
use tinylink::runtime::modes::{self, Mode};
use tinylink::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.explicit_config()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    let _guard = init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!("Configuration loaded from {}", cli.config);

    match modes::detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "server")]
        Mode::Server => modes::run_server(&config).await,
        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(cmd) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Unknown => {
            eprintln!("No execution mode available. Enable the 'server' or 'cli' feature.");
            std::process::exit(1);
        }
    }
}
