//! User settings for Mouse Manager
//!
//! Manages application preferences: backup location and retention, logging,
//! device detection and automatic backups.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::MousePaths;
use crate::backup::RetentionPolicy;
use crate::error::MouseError;
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Logging preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Default filter directive (e.g. "info", "mouse_manager=debug")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Mirror log output to stderr in CLI mode
    #[serde(default = "default_true")]
    pub console: bool,

    /// Number of daily log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: true,
            max_files: default_max_log_files(),
        }
    }
}

/// User settings for Mouse Manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Backup directory override; defaults to `<base>/backups`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    /// Backup retention policy
    #[serde(default)]
    pub retention: RetentionPolicy,

    /// Logging preferences
    #[serde(default)]
    pub logging: LogSettings,

    /// How long a device scan is reused before rescanning, in milliseconds
    #[serde(default = "default_device_cache_ms")]
    pub device_cache_ms: u64,

    /// Take a backup before changing any setting
    #[serde(default = "default_true")]
    pub auto_backup_before_change: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    14
}

fn default_device_cache_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_dir: None,
            retention: RetentionPolicy::default(),
            logging: LogSettings::default(),
            device_cache_ms: default_device_cache_ms(),
            auto_backup_before_change: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MousePaths) -> Result<Self, MouseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            read_json_required(&settings_path).map_err(|e| {
                MouseError::Config(format!("Failed to load settings file: {}", e))
            })
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MousePaths) -> Result<(), MouseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The effective backup directory
    pub fn backup_dir(&self, paths: &MousePaths) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| paths.backup_dir())
    }

    /// Device scan memo lifetime
    pub fn device_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.device_cache_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.retention.keep_latest, 1);
        assert_eq!(settings.device_cache_ttl(), Duration::from_secs(2));
        assert!(settings.auto_backup_before_change);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.retention.max_count = Some(5);
        settings.auto_backup_before_change = false;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.retention.max_count, Some(5));
        assert!(!loaded.auto_backup_before_change);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"device_cache_ms": 500}"#).unwrap();
        assert_eq!(settings.device_cache_ms, 500);
        assert_eq!(settings.schema_version, 1);
        assert!(settings.logging.console);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, MouseError::Config(_)));
    }

    #[test]
    fn test_backup_dir_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(settings.backup_dir(&paths), paths.backup_dir());

        settings.backup_dir = Some(temp_dir.path().join("elsewhere"));
        assert_eq!(settings.backup_dir(&paths), temp_dir.path().join("elsewhere"));
    }
}
