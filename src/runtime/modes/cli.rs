//! CLI mode

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::errors::Result;

pub async fn run_cli(cmd: Commands, config: &AppConfig) -> Result<()> {
    crate::interfaces::cli::run_cli_command(cmd, config).await
}
