use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use marquee_api::tmdb::TmdbSettings;
use marquee_api::traits::SortKey;

use crate::error::MarqueeError;
use crate::scroll_row::ScrollSettings;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub hero: HeroConfig,
    pub rows: RowsConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    pub regional_region: String,
    pub foreign_region: String,
    /// Environment variable holding the bearer token.
    pub token_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroConfig {
    pub slide_count: usize,
    pub autoplay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsConfig {
    pub scroll_step_items: u32,
    pub hover_margin_px: f32,
    pub default_item_width_px: f32,
    pub viewport_width_px: f32,
    pub sections: Vec<RowSection>,
}

/// One genre row on the home page. Without a genre the row lists
/// trending titles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub genre: Option<u32>,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub max_results: usize,
}

impl AppConfig {
    /// Load config: the user file if it exists, otherwise built-in defaults.
    pub fn load() -> Result<Self, MarqueeError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, MarqueeError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            tracing::debug!(path = %path.display(), "loading user config");
            Self::parse(&content)?
        } else {
            Self::parse(DEFAULT_CONFIG)?
        };
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, MarqueeError> {
        toml::from_str(content).map_err(|e| MarqueeError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), MarqueeError> {
        for (name, value) in [
            ("api.base_url", &self.api.base_url),
            ("api.image_base_url", &self.api.image_base_url),
        ] {
            Url::parse(value).map_err(|e| MarqueeError::Config(format!("{name}: {e}")))?;
        }
        if self.hero.autoplay_secs == 0 {
            return Err(MarqueeError::Config("hero.autoplay_secs must be positive".into()));
        }
        Ok(())
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), MarqueeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MarqueeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "marquee")
    }

    /// Read the bearer token from the configured environment variable.
    pub fn access_token(&self) -> Result<String, MarqueeError> {
        token_from(&self.api.token_env, std::env::var(&self.api.token_env).ok())
    }

    pub fn tmdb_settings(&self) -> TmdbSettings {
        TmdbSettings {
            base_url: self.api.base_url.trim_end_matches('/').to_string(),
            language: self.api.language.clone(),
            regional_region: self.api.regional_region.clone(),
            foreign_region: self.api.foreign_region.clone(),
            search_limit: self.search.max_results,
        }
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        ScrollSettings {
            step_items: self.rows.scroll_step_items,
            hover_margin: self.rows.hover_margin_px,
            default_item_width: self.rows.default_item_width_px,
        }
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_secs(self.hero.autoplay_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn token_from(var: &str, value: Option<String>) -> Result<String, MarqueeError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MarqueeError::AuthMissing(var.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.hero.slide_count, 5);
        assert_eq!(config.autoplay_interval(), Duration::from_secs(8));
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.search.max_results, 6);
        assert_eq!(config.api.language, "pt-BR");
        assert_eq!(config.scroll_settings(), ScrollSettings::default());
    }

    #[test]
    fn test_default_rows() {
        let config = AppConfig::default();
        let ids: Vec<_> = config.rows.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "trending",
                "new-releases",
                "action-movies",
                "comedies",
                "horror",
                "documentaries",
                "sci-fi",
                "animation",
                "drama"
            ]
        );
        assert_eq!(config.rows.sections[0].genre, None);
        assert_eq!(config.rows.sections[1].genre, Some(0));
        assert_eq!(config.rows.sections[1].sort, SortKey::ReleaseDateDesc);
        assert_eq!(config.rows.sections[2].sort, SortKey::PopularityDesc);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.hero.slide_count = 3;
        config.api.language = "en-US".into();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.hero.slide_count, 3);
        assert_eq!(loaded.tmdb_settings().language, "en-US");
        assert_eq!(loaded.rows.sections.len(), config.rows.sections.len());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.hero.slide_count, 5);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".into();
        config.save_to(&path).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, MarqueeError::Config(msg) if msg.starts_with("api.base_url")));
    }

    #[test]
    fn test_token_resolution() {
        assert_eq!(token_from("T", Some(" abc ".into())).unwrap(), "abc");
        assert!(matches!(
            token_from("T", Some("  ".into())),
            Err(MarqueeError::AuthMissing(var)) if var == "T"
        ));
        assert!(matches!(token_from("T", None), Err(MarqueeError::AuthMissing(_))));
    }
}
