use crate::error::{NotesError, Result};
use crate::model::{is_valid_datetime_format, DEFAULT_DATETIME_FORMAT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for notes, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Directory CSV exports are written to (current directory when unset)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// chrono format used when a note is saved with a blank date/time
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,

    /// Ask before deleting notes
    #[serde(default = "default_confirm")]
    pub confirm_destructive: bool,
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

fn default_confirm() -> bool {
    true
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            datetime_format: default_datetime_format(),
            confirm_destructive: default_confirm(),
        }
    }
}

/// Keys accepted by `snotes config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ExportDir,
    DatetimeFormat,
    ConfirmDestructive,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::ExportDir,
        ConfigKey::DatetimeFormat,
        ConfigKey::ConfirmDestructive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ExportDir => "export-dir",
            ConfigKey::DatetimeFormat => "datetime-format",
            ConfigKey::ConfirmDestructive => "confirm",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NotesError::Config(format!("Unknown config key: {}", s)))
    }
}

impl NotesConfig {
    /// Load config from the given directory.
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    %err,
                    path = %config_path.display(),
                    "could not read config, using defaults"
                );
                return Ok(Self::default());
            }
        };
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!(
                    %err,
                    path = %config_path.display(),
                    "config is corrupt, using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::ExportDir => self
                .export_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string()),
            ConfigKey::DatetimeFormat => self.datetime_format.clone(),
            ConfigKey::ConfirmDestructive => self.confirm_destructive.to_string(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::ExportDir => {
                let value = value.trim();
                self.export_dir = if value.is_empty() || value == "." {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            ConfigKey::DatetimeFormat => {
                if value.trim().is_empty() {
                    return Err(NotesError::Config(
                        "datetime-format cannot be empty".to_string(),
                    ));
                }
                if !is_valid_datetime_format(value) {
                    return Err(NotesError::Config(format!(
                        "Invalid datetime-format: {}",
                        value
                    )));
                }
                self.datetime_format = value.to_string();
            }
            ConfigKey::ConfirmDestructive => {
                self.confirm_destructive = parse_bool(value).ok_or_else(|| {
                    NotesError::Config(format!("Expected true or false, got: {}", value))
                })?;
            }
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL.into_iter().map(|k| (k, self.get(k))).collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = NotesConfig::default();
        assert_eq!(config.datetime_format, DEFAULT_DATETIME_FORMAT);
        assert!(config.confirm_destructive);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = NotesConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, NotesConfig::default());
    }

    #[test]
    fn test_load_corrupt_config_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();
        let config = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(config, NotesConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = NotesConfig::default();
        config.set(ConfigKey::ExportDir, "/tmp/exports").unwrap();
        config.set(ConfigKey::ConfirmDestructive, "no").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/exports")));
        assert!(!loaded.confirm_destructive);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"confirm_destructive": false}"#).unwrap();
        let loaded = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.datetime_format, DEFAULT_DATETIME_FORMAT);
        assert!(!loaded.confirm_destructive);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = NotesConfig::default();
        assert!(config.set(ConfigKey::ConfirmDestructive, "maybe").is_err());
        assert!(config.set(ConfigKey::DatetimeFormat, "  ").is_err());
        assert!(matches!(
            config.set(ConfigKey::DatetimeFormat, "%Q"),
            Err(NotesError::Config(_))
        ));
        assert_eq!(config, NotesConfig::default());

        config.set(ConfigKey::DatetimeFormat, "%Y-%m-%d").unwrap();
        assert_eq!(config.datetime_format, "%Y-%m-%d");
    }

    #[test]
    fn test_export_dir_dot_means_cwd() {
        let mut config = NotesConfig::default();
        config.set(ConfigKey::ExportDir, "out").unwrap();
        config.set(ConfigKey::ExportDir, ".").unwrap();
        assert!(config.export_dir.is_none());
        assert_eq!(config.get(ConfigKey::ExportDir), ".");
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(
            "datetime-format".parse::<ConfigKey>().unwrap(),
            ConfigKey::DatetimeFormat
        );
        assert_eq!(
            " Confirm ".parse::<ConfigKey>().unwrap(),
            ConfigKey::ConfirmDestructive
        );
        assert_eq!(
            "EXPORT-DIR".parse::<ConfigKey>().unwrap(),
            ConfigKey::ExportDir
        );
        assert!("file-ext".parse::<ConfigKey>().is_err());
    }
}
