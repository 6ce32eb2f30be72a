//! Generate config command

use std::path::Path;

use colored::Colorize;

use crate::config::AppConfig;
use crate::errors::{Result, TinylinkError};

pub fn generate_config(output_path: Option<String>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if Path::new(&path).exists() && !force {
        return Err(TinylinkError::file_operation(format!(
            "{} already exists, pass --force to overwrite",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    AppConfig::default().save_to_file(&path)?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    Ok(())
}
