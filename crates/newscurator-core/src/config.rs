use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `news.api_key`
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";
/// Environment variable that overrides `ai.openai_api_key`
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// News search API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the news search service
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// Restrict results to a language (e.g. "en"), service default if unset
    #[serde(default)]
    pub language: Option<String>,
    /// Sort order: "publishedAt", "relevancy" or "popularity"
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Number of articles requested per search
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_news_base_url(),
            language: None,
            sort_by: None,
            page_size: None,
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// OpenAI-compatible API base (e.g. a local gateway)
    #[serde(default)]
    pub openai_base_url: Option<String>,
    /// Concurrent summarization requests per run (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: None,
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// VADER-format lexicon file; the built-in lexicon is used when unset
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Topic pre-filled in the form
    #[serde(default = "default_topic")]
    pub default_topic: String,
    /// Theme name: "gruvbox-dark" or "gruvbox-light"
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            default_topic: default_topic(),
            theme: default_theme_name(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_news_base_url() -> String {
    "https://newsapi.org".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_concurrency() -> usize {
    1
}

fn default_tick_rate() -> u64 {
    100
}

fn default_topic() -> String {
    "Artificial Intelligence".to_string()
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from file or return defaults, then apply
    /// credential overrides from the environment
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file, defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Replace API keys with values from the environment when present
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = non_blank(lookup(NEWS_API_KEY_ENV)) {
            self.news.api_key = Some(key);
        }
        if let Some(key) = non_blank(lookup(OPENAI_API_KEY_ENV)) {
            self.ai.openai_api_key = Some(key);
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newscurator/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newscurator")
            .join("config.toml")
    }

    /// News API key, or a configuration error naming how to set it
    pub fn news_api_key(&self) -> crate::Result<&str> {
        self.news
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::Config(format!(
                    "News API key not configured (set {} or [news] api_key)",
                    NEWS_API_KEY_ENV
                ))
            })
    }

    /// OpenAI API key, or a configuration error naming how to set it
    pub fn openai_api_key(&self) -> crate::Result<&str> {
        self.ai
            .openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::Config(format!(
                    "OpenAI API key not configured (set {} or [ai] openai_api_key)",
                    OPENAI_API_KEY_ENV
                ))
            })
    }

    /// Lexicon file path with tilde expansion
    pub fn lexicon_path(&self) -> Option<PathBuf> {
        self.sentiment.lexicon_path.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.news.base_url, "https://newsapi.org");
        assert_eq!(config.ai.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.ai.concurrency, 1);
        assert_eq!(config.ui.default_topic, "Artificial Intelligence");
        assert!(config.news.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [news]
            api_key = "abc"
            page_size = 20

            [ai]
            concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.news.api_key.as_deref(), Some("abc"));
        assert_eq!(config.news.page_size, Some(20));
        assert_eq!(config.news.request_timeout_secs, 30);
        assert_eq!(config.ai.concurrency, 4);
        assert_eq!(config.ai.openai_model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_env_overrides_keys() {
        let mut config = AppConfig::default();
        config.news.api_key = Some("from-file".to_string());

        config.apply_env_overrides(|key| match key {
            NEWS_API_KEY_ENV => Some("from-env".to_string()),
            OPENAI_API_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.news_api_key().unwrap(), "from-env");
        assert!(config.openai_api_key().is_err());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config = AppConfig::default();
        let err = config.news_api_key().unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains(NEWS_API_KEY_ENV));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.ui.default_topic = "Space".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.ui.default_topic, "Space");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.ui.tick_rate_ms, 100);
    }
}
