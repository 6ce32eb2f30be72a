//! Mode routing
//!
//! No subcommand (or `serve`) runs the HTTP server; everything else is a
//! one-shot CLI command.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

use crate::cli::Commands;

#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli,
    Unknown,
}

/// Pick the mode for a parsed subcommand
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        #[cfg(feature = "server")]
        None | Some(Commands::Serve) => Mode::Server,
        #[cfg(feature = "cli")]
        Some(cmd) if *cmd != Commands::Serve => Mode::Cli,
        _ => Mode::Unknown,
    }
}
