//! Cleanup command

use colored::Colorize;

use crate::errors::Result;
use crate::services::ExpirySweeper;

pub async fn cleanup(sweeper: &ExpirySweeper) -> Result<()> {
    let removed = sweeper.run_once().await?;
    println!(
        "{}",
        format!("Removed {} expired URLs", removed).green().bold()
    );
    Ok(())
}
