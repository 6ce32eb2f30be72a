//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Tinylink - a small URL shortener service
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "A small URL shortener service", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Delete expired links once and exit
    Cleanup,

    /// Shorten a URL
    Shorten {
        /// URL to shorten
        url: String,

        /// Custom short code
        #[arg(long)]
        code: Option<String>,
    },

    /// Show a short code's metadata
    Stats {
        /// Short code to look up
        code: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Write a sample configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Whether the config file was given explicitly rather than defaulted
    pub fn explicit_config(&self) -> Option<&str> {
        (self.config != DEFAULT_CONFIG_PATH).then_some(self.config.as_str())
    }
}
