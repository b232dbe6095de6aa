//! Path management for Mouse Manager
//!
//! Resolves where configuration, backups and logs live.
//!
//! ## Path Resolution Order
//!
//! 1. `MOUSE_MANAGER_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/mouse-manager` or `~/.config/mouse-manager`
//! 3. Windows: `%APPDATA%\mouse-manager`

use std::path::PathBuf;

use crate::error::MouseError;

/// Environment variable that overrides the base directory
pub const HOME_ENV_VAR: &str = "MOUSE_MANAGER_HOME";

/// Manages all paths used by Mouse Manager
#[derive(Debug, Clone)]
pub struct MousePaths {
    /// Base directory for all Mouse Manager files
    base_dir: PathBuf,
}

impl MousePaths {
    /// Create a new MousePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a platform default can be
    /// determined.
    pub fn new() -> Result<Self, MouseError> {
        let base_dir = match std::env::var(HOME_ENV_VAR) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create MousePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the default backup directory (<base>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the log directory (<base>/logs/)
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the first-run marker
    pub fn first_run_marker(&self) -> PathBuf {
        self.base_dir.join("first_run.flag")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), MouseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MouseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| MouseError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.log_dir())
            .map_err(|e| MouseError::Io(format!("Failed to create log directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, MouseError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME")
                .map_err(|_| MouseError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("mouse-manager"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, MouseError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| MouseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("mouse-manager"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.log_dir(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.backup_dir().exists());
        assert!(paths.log_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.first_run_marker(),
            temp_dir.path().join("first_run.flag")
        );
    }
}
