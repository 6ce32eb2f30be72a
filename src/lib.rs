//! Tinylink - a small URL shortener service
//!
//! Long URLs are stored under short codes and resolved back with a visit
//! counter and an optional retention window.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Administrative commands (default)
//!
//! # Architecture
//! - `storage`: `LinkRepository` with SeaORM and in-memory backends
//! - `services`: code allocation, submission, resolution and expiry sweeps
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: command-line commands
//! - `config`: configuration loading and validation
//! - `runtime`: startup, shutdown and execution modes

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
