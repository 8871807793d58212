use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Units;

/// Per-user preferences persisted between runs.
///
/// This is the only durable state: the unit system and the last city that was
/// looked up. Stored as JSON under the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub units: Units,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_city: Option<String>,
}

impl Preferences {
    /// Load preferences from the default location. A missing, unreadable or
    /// corrupt file resets to defaults rather than failing the run.
    pub fn load() -> Self {
        match Self::prefs_file_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Save preferences to the default location, creating parent directories
    /// as needed. Callers that don't want save failures to surface can drop
    /// the result.
    pub fn save(&self) -> Result<()> {
        let path = Self::prefs_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize preferences to JSON")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write preferences file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the preferences file.
    pub fn prefs_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "quickweather", "quickweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("prefs.json"))
    }
}

/// Provider credentials, read from the environment once at process start and
/// passed down explicitly. Never persisted alongside preferences.
#[derive(Debug, Clone, Default)]
pub struct ApiCredentials {
    pub openweather_key: Option<String>,
}

impl ApiCredentials {
    pub const ENV_KEY: &'static str = "OPENWEATHER_KEY";

    pub fn from_env() -> Self {
        let key = std::env::var(Self::ENV_KEY)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self { openweather_key: key }
    }

    pub fn has_key(&self) -> bool {
        self.openweather_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = Preferences::load_from(&dir.path().join("does-not-exist.json"));
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.units, Units::Metric);
        assert!(prefs.last_city.is_none());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not valid json").expect("write fixture");

        assert_eq!(Preferences::load_from(&path), Preferences::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("prefs.json");

        let prefs = Preferences {
            units: Units::Imperial,
            last_city: Some("New York".to_string()),
        };
        prefs.save_to(&path).expect("save should succeed");

        assert_eq!(Preferences::load_from(&path), prefs);
    }

    #[test]
    fn units_serialize_as_lowercase_words() {
        let prefs = Preferences { units: Units::Metric, last_city: Some("London".into()) };
        let json = serde_json::to_string(&prefs).expect("serialize");
        assert!(json.contains("\"units\":\"metric\""));
        assert!(json.contains("\"last_city\":\"London\""));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"units": "imperial"}"#).expect("write fixture");

        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.units, Units::Imperial);
        assert!(prefs.last_city.is_none());
    }
}
