//! Configuration types for pdf-translate-api
//!
//! [`Config`] groups settings into sub-configs. Defaults make the service
//! usable with zero configuration apart from the OpenAI credential, and
//! [`Config::from_env`] overlays environment variables once at startup.

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

/// Where uploads and translation outputs live on disk
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted uploads (default: "uploads")
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Parent directory for per-task output directories (default: "output")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// External translator (babeldoc) and model endpoint settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Path to babeldoc executable (auto-detected if None)
    #[serde(default)]
    pub babeldoc_path: Option<PathBuf>,

    /// Whether to search PATH for babeldoc if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// OpenAI-compatible endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Credential for the endpoint
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model name passed to babeldoc (default: "gpt-4o-mini")
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum pages babeldoc handles per part (default: 30)
    #[serde(default = "default_max_pages_per_part")]
    pub max_pages_per_part: u32,

    /// Minimum text length babeldoc translates (default: 1)
    #[serde(default = "default_min_text_length")]
    pub min_text_length: u32,

    /// Watermark mode passed to babeldoc (default: "no_watermark")
    #[serde(default = "default_watermark_mode")]
    pub watermark_output_mode: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            babeldoc_path: None,
            search_path: true,
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            max_pages_per_part: default_max_pages_per_part(),
            min_text_length: default_min_text_length(),
            watermark_output_mode: default_watermark_mode(),
        }
    }
}

/// Task lifecycle settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskConfig {
    /// How long a task and its files are kept after submission (default: 4 hours)
    #[serde(default = "default_retention", with = "duration_serde")]
    pub retention: Duration,

    /// Target language when the client sends none (default: "ko")
    #[serde(default = "default_lang_out")]
    pub default_lang_out: String,

    /// Required upload extension, compared case-sensitively (default: ".pdf")
    #[serde(default = "default_upload_extension")]
    pub upload_extension: String,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            retention: default_retention(),
            default_lang_out: default_lang_out(),
            upload_extension: default_upload_extension(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,

    /// Largest accepted request body in bytes (default: 200 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Logging output settings (used by the binary)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter string used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit newline-delimited JSON instead of human-readable lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Main configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upload and output directories
    #[serde(default)]
    pub storage: StorageConfig,

    /// External translator settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Task lifecycle settings
    #[serde(default)]
    pub tasks: TaskConfig,

    /// HTTP server settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Build a [`Config`] from environment variables, falling back to defaults.
    ///
    /// Unparseable numeric or boolean values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Some(dir) = env_var("PDF_API_UPLOAD_DIR") {
            config.storage.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env_var("PDF_API_OUTPUT_DIR") {
            config.storage.output_dir = PathBuf::from(dir);
        }

        if let Some(path) = env_var("BABELDOC_PATH") {
            config.translator.babeldoc_path = Some(PathBuf::from(path));
        }
        if let Some(url) = env_var("OPENAI_BASE_URL") {
            config.translator.base_url = url;
        }
        config.translator.api_key = env_var("OPENAI_API_KEY");
        if let Some(model) = env_var("OPENAI_DEFAULT_MODEL") {
            config.translator.model = model;
        }

        if let Some(secs) = parse_env::<u64>("PDF_API_RETENTION_SECS") {
            config.tasks.retention = Duration::from_secs(secs);
        }
        if let Some(lang) = env_var("PDF_API_DEFAULT_LANG") {
            config.tasks.default_lang_out = lang;
        }

        if let Some(addr) = parse_env::<SocketAddr>("PDF_API_BIND") {
            config.api.bind_address = addr;
        }
        if let Some(limit) = parse_env::<usize>("PDF_API_MAX_UPLOAD_BYTES") {
            config.api.max_upload_bytes = limit;
        }
        if let Some(origins) = env_var("PDF_API_CORS_ORIGINS") {
            config.api.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(enabled) = env_var("PDF_API_SWAGGER_UI").and_then(|v| parse_bool(&v)) {
            config.api.swagger_ui = enabled;
        }

        if let Some(level) = env_var("PDF_API_LOG") {
            config.log.level = level;
        }
        if let Some(json) = env_var("PDF_API_LOG_JSON").and_then(|v| parse_bool(&v)) {
            config.log.json = json;
        }

        config
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.tasks.retention.is_zero() {
            return Err(Error::Config {
                message: "task retention must be greater than zero".into(),
                key: Some("tasks.retention".into()),
            });
        }
        if self.api.max_upload_bytes == 0 {
            return Err(Error::Config {
                message: "upload limit must be greater than zero".into(),
                key: Some("api.max_upload_bytes".into()),
            });
        }
        if self.tasks.upload_extension.is_empty() {
            return Err(Error::Config {
                message: "upload extension must not be empty".into(),
                key: Some("tasks.upload_extension".into()),
            });
        }
        Ok(())
    }
}

/// Parse a form or environment boolean the way HTML forms send them
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "y" | "t" => Some(true),
        "0" | "false" | "no" | "off" | "n" | "f" => Some(false),
        _ => None,
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_pages_per_part() -> u32 {
    30
}

fn default_min_text_length() -> u32 {
    1
}

fn default_watermark_mode() -> String {
    "no_watermark".to_string()
}

fn default_retention() -> Duration {
    Duration::from_secs(4 * 60 * 60) // 4 hours
}

fn default_lang_out() -> String {
    "ko".to_string()
}

fn default_upload_extension() -> String {
    ".pdf".to_string()
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_upload_bytes() -> usize {
    200 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
