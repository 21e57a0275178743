//! Configuration file support for ThemeSwitch
//!
//! Handles `.themeswitch.toml` configuration file loading and saving.

use crate::catalog::{CatalogClient, API_BASE_URL, DEFAULT_TIMEOUT};
use crate::contact::{
    ContactDelivery, LogDelivery, OutboxDelivery, DEFAULT_STATUS_RESET, DEFAULT_SUBMIT_DELAY,
};
use crate::storage::DEFAULT_PREFERENCES_FILE;
use crate::theme_store::DEFAULT_TRANSITION;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".themeswitch.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File holding the persisted theme preference
    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,

    /// Log file used while the TUI owns the terminal
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Catalog API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Landing page catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Theme switching behavior
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Contact form behavior
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferences_file: default_preferences_file(),
            log_file: default_log_file(),
            api: ApiConfig::default(),
            catalog: CatalogConfig::default(),
            theme: ThemeConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

/// Catalog API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the catalog API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request deadline in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Catalog client for the configured origin and deadline
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new()
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Landing page catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Number of featured products (0 fetches all)
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
}

impl CatalogConfig {
    /// Limit passed to the fetcher, `None` for all products
    pub fn limit(&self) -> Option<u32> {
        (self.featured_limit > 0).then_some(self.featured_limit)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
        }
    }
}

/// Theme switching behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Length of the transitioning window in milliseconds (default: 500)
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

impl ThemeConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
        }
    }
}

/// Contact form behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Simulated sending time in milliseconds (default: 2000)
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// How long the result banner stays in milliseconds (default: 3000)
    #[serde(default = "default_status_reset_ms")]
    pub status_reset_ms: u64,

    /// Append submitted messages to this file as JSON lines
    /// (messages are only logged when unset)
    #[serde(default)]
    pub outbox: Option<PathBuf>,
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn status_reset(&self) -> Duration {
        Duration::from_millis(self.status_reset_ms)
    }

    /// Delivery backend for submitted messages
    pub fn delivery(&self) -> Box<dyn ContactDelivery> {
        match &self.outbox {
            Some(path) => Box::new(OutboxDelivery::new(path)),
            None => Box::new(LogDelivery),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            status_reset_ms: default_status_reset_ms(),
            outbox: None,
        }
    }
}

// Default value functions
fn default_preferences_file() -> PathBuf {
    PathBuf::from(DEFAULT_PREFERENCES_FILE)
}

fn default_log_file() -> PathBuf {
    PathBuf::from(".themeswitch/themeswitch.log")
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_featured_limit() -> u32 {
    6
}

fn default_transition_ms() -> u64 {
    DEFAULT_TRANSITION.as_millis() as u64
}

fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY.as_millis() as u64
}

fn default_status_reset_ms() -> u64 {
    DEFAULT_STATUS_RESET.as_millis() as u64
}

impl Config {
    /// Load configuration file (returns default if not found)
    ///
    /// Searches for `.themeswitch.toml` in the current directory.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to specified path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default(path: &Path) -> Result<()> {
        Config::default().save_to(path)
    }
}
