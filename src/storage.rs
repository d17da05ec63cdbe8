use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_TOKEN;

const SETTINGS_FILE: &str = "settings.yaml";

/// Color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Values persisted between sessions
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

/// Persisted user settings, loaded once and written on every change
pub struct SettingsStore {
    settings: Settings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Load from `~/.satria/settings.yaml`
    pub fn load() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".satria");
        Self::load_from(config_dir.join(SETTINGS_FILE))
    }

    /// Load from an explicit file. A missing or unreadable file yields defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match read_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable settings");
                }
                Settings::default()
            }
        };
        SettingsStore {
            settings,
            path: Some(path),
        }
    }

    /// A store that never touches the filesystem
    pub fn in_memory(settings: Settings) -> Self {
        SettingsStore {
            settings,
            path: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    /// Bearer token, falling back to the development token
    pub fn token(&self) -> &str {
        self.settings
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOKEN)
    }

    /// Directory that receives downloaded reports
    pub fn download_dir(&self) -> PathBuf {
        self.settings
            .download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.settings.theme = theme;
        self.save()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.settings.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_yaml::to_string(&self.settings)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings = serde_yaml::from_str(&content)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load_from(dir.path().join("settings.yaml"));
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.token(), "dev-token-12345");
        assert_eq!(store.download_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_theme_change_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");

        let mut store = SettingsStore::load_from(&path);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);

        let reloaded = SettingsStore::load_from(&path);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_token_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "theme: dark\ntoken: secret-1\n").unwrap();

        let store = SettingsStore::load_from(&path);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.token(), "secret-1");
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "theme: [purple").unwrap();

        let store = SettingsStore::load_from(&path);
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_empty_token_falls_back() {
        let store = SettingsStore::in_memory(Settings {
            token: Some(String::new()),
            ..Settings::default()
        });
        assert_eq!(store.token(), "dev-token-12345");
    }
}
