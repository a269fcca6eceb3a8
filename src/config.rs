use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::calendar::Provider;
use crate::theme::ThemeConfig;

pub const APP_DIR: &str = "calendar-link";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings from `<config_dir>/calendar-link/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Provider selected when the form opens.
    pub provider: Provider,
    /// How long the "copied" indicator stays on.
    pub copy_feedback_ms: u64,
    /// Filter directive for the log file, e.g. `info` or `calendar_link=debug`.
    pub log_level: String,
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            copy_feedback_ms: 3000,
            log_level: "info".to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the user's config, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.copy_feedback(), Duration::from_secs(3));
    }

    #[test]
    fn parses_full_config() {
        let toml = r##"
provider = "outlook"
copy_feedback_ms = 1500
log_level = "calendar_link=debug"

[theme]
preset = "nord"
accent_fg = "#88c0d0"
"##;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider, Provider::Outlook);
        assert_eq!(config.copy_feedback(), Duration::from_millis(1500));
        assert_eq!(config.log_level, "calendar_link=debug");
        assert_eq!(config.theme.preset.as_deref(), Some("nord"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(r#"provider = "yahoo""#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/nonexistent/calendar-link/config.toml");
        let err = AppConfig::from_file(path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/calendar-link/config.toml"));
    }
}
