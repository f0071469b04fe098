use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::WeatherError;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Cities reported by the batch modes unless the settings file says otherwise.
pub const DEFAULT_CITIES: &[&str] = &["London", "Austria", "Tokyo", "New York City", "Lagos", "Sydney"];

/// Optional overrides stored on disk.
///
/// Example TOML:
/// cities = ["London", "Tokyo"]
/// log_dir = "logs"
/// listen = "0.0.0.0:8080"
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub cities: Option<Vec<String>>,
    pub log_dir: Option<PathBuf>,
    pub listen: Option<String>,
    pub base_url: Option<String>,
}

impl Settings {
    /// Settings with every key filled in from the built-in defaults.
    pub fn defaults() -> Self {
        Self {
            cities: Some(DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()),
            log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
            listen: Some(DEFAULT_LISTEN.to_string()),
            base_url: Some(DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Load settings from disk, or return empty settings if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Save settings to the platform settings file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_file_path()?)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Everything a run needs, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    api_key: Option<String>,
    pub cities: Vec<String>,
    pub log_dir: PathBuf,
    pub listen: String,
    pub base_url: String,
}

impl Config {
    /// Read the settings file and the API key from the environment.
    pub fn load() -> Result<Self> {
        let settings = Settings::load()?;
        Ok(Self::from_parts(settings, std::env::var(API_KEY_ENV).ok()))
    }

    pub fn from_parts(settings: Settings, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            cities: settings
                .cities
                .unwrap_or_else(|| DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()),
            log_dir: settings.log_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            listen: settings.listen.unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
            base_url: settings.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// The API key, required by every mode that reports to a user.
    pub fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The API key or an empty string; only the brief mode tolerates this.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_settings_are_empty() {
        let cfg = Config::from_parts(Settings::default(), Some("KEY".into()));

        assert_eq!(cfg.cities, DEFAULT_CITIES);
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
        assert_eq!(cfg.listen, "0.0.0.0:8080");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api_key().expect("key present"), "KEY");
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let cfg = Config::from_parts(Settings::default(), Some("  ".into()));

        assert!(!cfg.has_api_key());
        assert!(matches!(cfg.api_key(), Err(WeatherError::MissingApiKey)));
        assert_eq!(cfg.api_key_or_empty(), "");
    }

    #[test]
    fn settings_override_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            cities = ["Oslo"]
            listen = "127.0.0.1:9000"
            "#,
        )
        .expect("valid toml");

        let cfg = Config::from_parts(settings, None);
        assert_eq!(cfg.cities, vec!["Oslo".to_string()]);
        assert_eq!(cfg.listen, "127.0.0.1:9000");
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn missing_settings_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = Settings::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        Settings::defaults().save_to(&path).expect("save");
        let loaded = Settings::load_from(&path).expect("load");

        assert_eq!(loaded, Settings::defaults());
    }

    #[test]
    fn settings_file_lives_in_config_dir() {
        // Hosts without a home directory have no platform config dir.
        if let Ok(path) = Settings::settings_file_path() {
            assert!(path.ends_with("config.toml"), "{}", path.display());
        }
    }

    #[test]
    fn base_url_is_read_from_settings() {
        let settings: Settings =
            toml::from_str(r#"base_url = "http://127.0.0.1:9/weather""#).expect("valid toml");
        let cfg = Config::from_parts(settings, None);
        assert_eq!(cfg.base_url, "http://127.0.0.1:9/weather");
    }

    #[test]
    fn malformed_settings_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "cities = 3").expect("write");

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
