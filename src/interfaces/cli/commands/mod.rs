mod cleanup;
mod config_gen;
mod links;

pub use cleanup::cleanup;
pub use config_gen::generate_config;
pub use links::{shorten, stats};
