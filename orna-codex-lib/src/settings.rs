//! Persisted user settings (display language, dataset directory).
//!
//! Frontends share one settings file at
//! `~/.config/orna-codex/settings.toml` so the chosen language and data
//! directory survive restarts. The engine never reads it directly.

use std::path::{Path, PathBuf};

use orna_codex_catalog::{DEFAULT_LANGUAGE, LANGUAGES};
use serde::{Deserialize, Serialize};

use crate::error::CodexError;

/// Dataset directory used when neither the CLI nor the settings name one.
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Active display language code.
    pub language: String,
    /// Extra languages loaded only to widen search.
    pub secondary_languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            secondary_languages: LANGUAGES
                .iter()
                .map(|(code, _)| code.to_string())
                .filter(|code| code != DEFAULT_LANGUAGE)
                .collect(),
            data_dir: None,
        }
    }
}

impl UserSettings {
    /// Active language first, then secondaries, without duplicates.
    pub fn languages(&self) -> Vec<String> {
        let mut out = vec![self.language.clone()];
        for code in &self.secondary_languages {
            if !out.contains(code) {
                out.push(code.clone());
            }
        }
        out
    }

    /// Switch the active language, keeping the previous one searchable.
    pub fn set_language(&mut self, code: &str) {
        if self.language == code {
            return;
        }
        let previous = std::mem::replace(&mut self.language, code.to_string());
        self.secondary_languages.retain(|c| c != code);
        if !self.secondary_languages.contains(&previous) {
            self.secondary_languages.push(previous);
        }
    }
}

/// Canonical path to the settings file: `~/.config/orna-codex/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("orna-codex").join("settings.toml")
}

pub fn load_settings() -> UserSettings {
    load_settings_from(&settings_path())
}

/// Read settings from `path`. Missing or unreadable files give defaults.
pub fn load_settings_from(path: &Path) -> UserSettings {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings at {}, using defaults", path.display());
            return UserSettings::default();
        }
        Err(e) => {
            log::warn!("Could not read {}: {}; using defaults", path.display(), e);
            return UserSettings::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            UserSettings::default()
        }
    }
}

pub fn save_settings(settings: &UserSettings) -> Result<(), CodexError> {
    save_settings_to(&settings_path(), settings)
}

/// Write settings to `path` atomically (temp file + rename).
pub fn save_settings_to(path: &Path, settings: &UserSettings) -> Result<(), CodexError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CodexError::settings(format!("{}: {}", parent.display(), e)))?;
    }
    let serialized =
        toml::to_string_pretty(settings).map_err(|e| CodexError::settings(e.to_string()))?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)
        .map_err(|e| CodexError::settings(format!("{}: {}", tmp.display(), e)))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| CodexError::settings(format!("{}: {}", path.display(), e)))?;
    log::debug!("Saved settings to {}", path.display());
    Ok(())
}

/// Resolve the dataset directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `data_dir` in `settings.toml`
/// 3. `./data`
pub fn resolve_data_dir(cli_override: Option<PathBuf>, settings: &UserSettings) -> PathBuf {
    cli_override
        .or_else(|| settings.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// The settings as pretty-printed TOML, for display.
pub fn settings_string(settings: &UserSettings) -> Result<String, CodexError> {
    toml::to_string_pretty(settings).map_err(|e| CodexError::settings(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_chinese_and_search_english() {
        let s = UserSettings::default();
        assert_eq!(s.language, "zh-hans");
        assert_eq!(s.languages(), vec!["zh-hans", "en"]);
        assert_eq!(resolve_data_dir(None, &s), PathBuf::from("data"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.toml"));
        assert_eq!(s, UserSettings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "language = [not toml").unwrap();
        assert_eq!(load_settings_from(&path), UserSettings::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = UserSettings {
            language: "en".into(),
            secondary_languages: vec!["zh-hans".into()],
            data_dir: Some(PathBuf::from("/srv/codex")),
        };
        save_settings_to(&path, &settings).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "language = \"en\"\n").unwrap();
        let s = load_settings_from(&path);
        assert_eq!(s.language, "en");
        assert_eq!(s.data_dir, None);
    }

    #[test]
    fn cli_override_wins() {
        let s = UserSettings {
            data_dir: Some(PathBuf::from("saved")),
            ..UserSettings::default()
        };
        assert_eq!(resolve_data_dir(None, &s), PathBuf::from("saved"));
        assert_eq!(
            resolve_data_dir(Some(PathBuf::from("flag")), &s),
            PathBuf::from("flag")
        );
    }

    #[test]
    fn set_language_keeps_previous_searchable() {
        let mut s = UserSettings::default();
        s.set_language("en");
        assert_eq!(s.language, "en");
        assert_eq!(s.languages(), vec!["en", "zh-hans"]);
        s.set_language("en");
        assert_eq!(s.secondary_languages, vec!["zh-hans"]);
    }
}
