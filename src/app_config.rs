use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::locale::Locale;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Document store (headless CMS) settings
    #[serde(default)]
    pub cms: CmsConfig,

    /// Locales served by the site
    #[serde(default)]
    pub locales: LocaleConfig,

    /// Contact submission storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Contact notification settings
    #[serde(default)]
    pub notification: NotificationConfig,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Maximum relationship depth ever requested from the store
pub const MAX_DEPTH: u8 = 2;

/// Upper bound for `cms.retry_count`
pub const MAX_RETRY_COUNT: u32 = 10;

/// Document store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CmsConfig {
    // @field: Base URL of the CMS, without the /api suffix
    #[serde(default = "default_cms_endpoint")]
    pub endpoint: String,

    // @field: API key, sent as `users API-Key <key>` when present
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Relationship expansion depth, clamped to MAX_DEPTH
    #[serde(default = "default_depth")]
    pub depth: u8,

    // @field: Retries for connection failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Prefix for relative media paths
    #[serde(default = "String::new")]
    pub media_base_url: String,

    // @field: JSON fixture file served instead of the CMS
    #[serde(default)]
    pub fixtures_path: Option<PathBuf>,
}

impl CmsConfig {
    /// Depth actually sent to the store
    pub fn effective_depth(&self) -> u8 {
        self.depth.min(MAX_DEPTH)
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_cms_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            depth: default_depth(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            media_base_url: String::new(),
            fixtures_path: None,
        }
    }
}

/// Locale configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocaleConfig {
    /// Locales with published content
    #[serde(default = "default_supported_locales")]
    pub supported: Vec<Locale>,

    /// Locale used when negotiation finds nothing
    #[serde(default)]
    pub default: Locale,
}

impl LocaleConfig {
    /// Whether the locale is published
    pub fn is_supported(&self, locale: Locale) -> bool {
        self.supported.contains(&locale)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: default_supported_locales(),
            default: Locale::default(),
        }
    }
}

/// Database configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// SQLite file; the platform data directory is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Contact notification configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Whether a notification is dispatched for each submission
    #[serde(default)]
    pub enabled: bool,

    /// Address receiving the notification
    #[serde(default = "String::new")]
    pub recipient: String,

    /// Sender address
    #[serde(default = "default_sender")]
    pub sender: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            recipient: String::new(),
            sender: default_sender(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_cms_endpoint() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_depth() -> u8 {
    MAX_DEPTH
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    200 // doubled on each retry
}

fn default_supported_locales() -> Vec<Locale> {
    Locale::ALL.to_vec()
}

fn default_sender() -> String {
    "no-reply@localhost".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from a JSON file, writing defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.cms.fixtures_path.is_none() {
            url::Url::parse(&self.cms.endpoint)
                .map_err(|e| anyhow!("Invalid CMS endpoint '{}': {}", self.cms.endpoint, e))?;
        }

        if self.cms.timeout_secs == 0 {
            return Err(anyhow!("CMS timeout must be at least one second"));
        }

        if self.cms.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!(
                "CMS retry count must be at most {}, got {}",
                MAX_RETRY_COUNT,
                self.cms.retry_count
            ));
        }

        if self.locales.supported.is_empty() {
            return Err(anyhow!("At least one locale must be supported"));
        }

        if !self.locales.is_supported(self.locales.default) {
            return Err(anyhow!(
                "Default locale '{}' is not in the supported list",
                self.locales.default
            ));
        }

        if self.notification.enabled && self.notification.recipient.trim().is_empty() {
            return Err(anyhow!("Notification recipient is required when notifications are enabled"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            cms: CmsConfig::default(),
            locales: LocaleConfig::default(),
            database: DatabaseConfig::default(),
            notification: NotificationConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
