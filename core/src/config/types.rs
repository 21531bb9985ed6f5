use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::engine::WaitOptions;
use crate::model::{SearchableSettings, MEILISEARCH_ENGINE};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub scout: ScoutConfig,

    #[serde(default)]
    pub meilisearch: MeilisearchConfig,

    #[serde(default)]
    pub wait: WaitConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "meiliscout_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Engine used by models that do not name one.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Prepended to every index name.
    #[serde(default)]
    pub prefix: String,
}

fn default_driver() -> String {
    MEILISEARCH_ENGINE.to_string()
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            prefix: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeilisearchConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub key: String,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_host() -> String {
    "http://127.0.0.1:7700".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

impl Default for MeilisearchConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            key: String::new(),
            timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Maximum time spent polling a single task.
    #[serde(default = "default_wait_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_wait_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_wait_timeout_ms() -> u64 {
    5_000
}

fn default_wait_interval_ms() -> u64 {
    50
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_wait_timeout_ms(),
            interval_ms: default_wait_interval_ms(),
            retry: RetryConfig::default(),
        }
    }
}

impl WaitConfig {
    pub fn options(&self) -> WaitOptions {
        WaitOptions {
            timeout: Duration::from_millis(self.timeout_ms.max(1)),
            interval: Duration::from_millis(self.interval_ms.max(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_retry_strategy")]
    pub strategy: String,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_retry_strategy() -> String {
    "exponential-backoff".to_string()
}

fn default_base_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    2_000
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            strategy: default_retry_strategy(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Use the live task renderer when stdout is a terminal.
    #[serde(default = "default_rich")]
    pub rich: bool,
}

fn default_rich() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            rich: default_rich(),
        }
    }
}

/// A `[[models]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,

    #[serde(default)]
    pub index: Option<String>,

    #[serde(default)]
    pub engine: Option<String>,

    #[serde(default = "default_searchable")]
    pub searchable: bool,

    /// Field names produced by the model's serialization.
    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub displayable: Option<Vec<String>>,

    #[serde(default)]
    pub filterable: Option<Vec<String>>,

    #[serde(default)]
    pub sortable: Option<Vec<String>>,

    /// Declaration on the type.
    #[serde(default)]
    pub settings: Option<SearchableSettings>,

    /// Declaration on the serialization method.
    #[serde(default)]
    pub serialization_settings: Option<SearchableSettings>,
}

fn default_searchable() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            index: None,
            engine: None,
            searchable: default_searchable(),
            fields: Vec::new(),
            displayable: None,
            filterable: None,
            sortable: None,
            settings: None,
            serialization_settings: None,
        }
    }
}
