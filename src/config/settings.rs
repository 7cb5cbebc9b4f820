//! Configuration settings for Snippetropolis.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "TWELVE_LABS_BASE_URL";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub index: IndexSettings,
    pub upload: UploadSettings,
    pub search: SearchSettings,
    pub chat: ChatSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Remote service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the Twelve Labs API, without the version segment.
    pub base_url: String,
    /// API version path segment.
    pub version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Page size used when listing indexes and videos.
    pub page_limit: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.twelvelabs.io".to_string(),
            version: "v1.2".to_string(),
            timeout_secs: 30,
            page_limit: 50,
        }
    }
}

impl ApiSettings {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Index creation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Engines used when `--engines` is not given.
    pub default_engines: Vec<String>,
    /// Addons requested for new indexes.
    pub addons: Vec<String>,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            default_engines: vec!["marengo2.6".to_string()],
            addons: vec!["thumbnail".to_string()],
        }
    }
}

/// Video upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Language tag used when `--language` is not given.
    pub default_language: String,
    /// Seconds between task status checks when waiting for processing.
    pub poll_interval_secs: u64,
    /// Give up waiting for processing after this many seconds.
    pub max_wait_secs: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            poll_interval_secs: 5,
            max_wait_secs: 1800,
        }
    }
}

/// Search request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of results per search.
    pub page_limit: u32,
    /// Minimum confidence class (high, medium, low, none).
    pub threshold: String,
    /// Search modalities sent with every query.
    pub options: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_limit: 10,
            threshold: "none".to_string(),
            options: vec!["visual".to_string(), "audio".to_string()],
        }
    }
}

/// Chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Number of previous turns included as context for a new question.
    pub history_turns: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self { history_turns: 10 }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// `TWELVE_LABS_BASE_URL` overrides the configured base URL.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                settings.api.base_url = base_url.trim().to_string();
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check values that would otherwise only fail at request time.
    pub fn validate(&self) -> crate::error::Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            crate::error::SnipError::Config(format!(
                "api.base_url '{}' is not a valid URL: {}",
                self.api.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(crate::error::SnipError::Config(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(crate::error::SnipError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.upload.poll_interval_secs == 0 {
            return Err(crate::error::SnipError::Config(
                "upload.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SnipError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snippetropolis")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded custom prompt directory, if configured.
    pub fn prompts_dir(&self) -> Option<PathBuf> {
        self.prompts.custom_dir.as_deref().map(Self::expand_path)
    }
}
