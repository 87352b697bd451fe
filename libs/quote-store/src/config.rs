use crate::remote::{DEFAULT_BASE_URL, DEFAULT_FETCH_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment override for the long-lived store path
pub const STORE_PATH_ENV: &str = "QUOTE_STORE_PATH";

/// Environment override for the remote base URL
pub const REMOTE_URL_ENV: &str = "QUOTE_REMOTE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Quote generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Notes gathered while loading, logged once tracing is up
    #[serde(skip)]
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File backing the long-lived store
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "data/quotes_store.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Post newly added quotes to the remote endpoint
    #[serde(default = "default_publish_on_add")]
    pub publish_on_add: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fetch_limit: default_fetch_limit(),
            sync_interval_secs: default_sync_interval_secs(),
            publish_on_add: default_publish_on_add(),
        }
    }
}

impl RemoteConfig {
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

fn default_sync_interval_secs() -> u64 {
    30
}

fn default_publish_on_add() -> bool {
    true
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            remote: RemoteConfig::default(),
            log_level: default_log_level(),
            notices: Vec::new(),
        }
    }
}

impl QuoteConfig {
    /// Load configuration from a YAML file
    ///
    /// A missing file yields the defaults. `.env` and environment overrides
    /// are applied afterwards, then the result is validated.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            let yaml_content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&yaml_content)?
        } else {
            let mut config = Self::default();
            config
                .notices
                .push(format!("Config file {:?} not found, using defaults", config_path));
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from YAML text without env overrides
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(STORE_PATH_ENV) {
            self.notices
                .push(format!("Overriding store path from {}", STORE_PATH_ENV));
            self.storage.path = path;
        }

        if let Ok(url) = std::env::var(REMOTE_URL_ENV) {
            self.notices
                .push(format!("Overriding remote URL from {}", REMOTE_URL_ENV));
            self.remote.base_url = url;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.path must not be empty".to_string(),
            ));
        }

        if self.remote.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "remote.base_url must not be empty".to_string(),
            ));
        }

        if self.remote.fetch_limit == 0 {
            return Err(ConfigError::ValidationError(
                "remote.fetch_limit must be greater than 0".to_string(),
            ));
        }

        if self.remote.sync_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "remote.sync_interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
