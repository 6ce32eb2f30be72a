use serde::{Deserialize, Serialize};

use crate::errors::{Result, TinylinkError};
use crate::utils::MAX_SHORT_CODE_LEN;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Application configuration
///
/// Loaded once at startup and handed to each component by value or `Arc`.
/// Sources, lowest to highest priority: built-in defaults, the TOML file,
/// environment variables prefixed with `TL` and separated by `__`
/// (e.g. `TL__SERVER__PORT=9000`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub sweeper: SweeperConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `path` (or `config.toml`) and the environment
    ///
    /// An explicitly given path must exist; the default one is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("TL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| TinylinkError::config(format!("Failed to build config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| TinylinkError::config(format!("Failed to deserialize config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot work with
    pub fn validate(&self) -> Result<()> {
        let s = &self.shortener;
        if s.code_length == 0 || s.code_length > MAX_SHORT_CODE_LEN {
            return Err(TinylinkError::config(format!(
                "shortener.code_length must be between 1 and {}, got {}",
                MAX_SHORT_CODE_LEN, s.code_length
            )));
        }
        if s.max_generate_attempts == 0 {
            return Err(TinylinkError::config(
                "shortener.max_generate_attempts must be at least 1",
            ));
        }
        url::Url::parse(&s.base_url).map_err(|e| {
            TinylinkError::config(format!("shortener.base_url '{}' is invalid: {}", s.base_url, e))
        })?;

        if self.rate_limit.enabled
            && (self.rate_limit.seconds_per_request == 0 || self.rate_limit.burst_size == 0)
        {
            return Err(TinylinkError::config(
                "rate_limit.seconds_per_request and rate_limit.burst_size must be non-zero",
            ));
        }

        if self.database.database_url.is_empty() {
            return Err(TinylinkError::config("database.database_url is empty"));
        }

        Ok(())
    }

    /// Write this configuration as TOML, creating parent directories
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TinylinkError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// sqlite://, mysql://, mariadb://, postgres:// or memory://
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortenerConfig {
    /// Prefix for full short links, e.g. `https://ti.ny`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Lifetime of new links in days; 0 means links never expire
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_max_generate_attempts")]
    pub max_generate_attempts: u32,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            retention_days: default_retention_days(),
            code_length: default_code_length(),
            max_generate_attempts: default_max_generate_attempts(),
        }
    }
}

/// Per-IP limit on `POST /api/shorten`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// One token is replenished every this many seconds
    #[serde(default = "default_seconds_per_request")]
    pub seconds_per_request: u64,
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seconds_per_request: default_seconds_per_request(),
            burst_size: default_burst_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweeperConfig {
    /// 0 disables the background sweep
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sweep_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_true")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            enable_rotation: true,
            max_backups: default_max_backups(),
        }
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://tinylink.db?mode=rwc".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_retention_days() -> u32 {
    30
}

fn default_code_length() -> usize {
    6
}

fn default_max_generate_attempts() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

fn default_seconds_per_request() -> u64 {
    12
}

fn default_burst_size() -> u32 {
    5
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}
