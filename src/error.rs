//! Custom error types for Mouse Manager
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{SettingKey, SettingsValues};

/// The main error type for Mouse Manager operations
#[derive(Error, Debug)]
pub enum MouseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A setting value was rejected before reaching the system
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backup directory (or a file inside it) could not be written
    #[error("Cannot write backup at {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Backup failed to parse or its checksum does not match its values
    #[error("Backup {} is corrupt: {reason}", path.display())]
    CorruptSnapshot { path: PathBuf, reason: String },

    /// Some settings were applied before one failed
    #[error("{0}")]
    PartialRestore(Box<PartialRestore>),

    /// The OS refused a settings write
    #[error("Permission denied while changing {key}: {reason} (try running as administrator)")]
    Permission { key: SettingKey, reason: String },

    /// Device enumeration errors
    #[error("Device error: {0}")]
    Device(String),

    /// Operation not available on this platform
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

/// Breakdown of a restore that stopped partway through
#[derive(Debug, Clone)]
pub struct PartialRestore {
    /// Settings that reached the system, in application order
    pub applied: SettingsValues,
    /// The setting whose application failed
    pub failed: SettingKey,
    /// Why it failed
    pub reason: String,
    /// The failed setting followed by every setting that was never attempted
    pub not_applied: Vec<SettingKey>,
    /// The OS refused the write for lack of privileges
    pub permission_denied: bool,
}

impl PartialRestore {
    /// True when the system was left exactly as it was
    pub fn nothing_applied(&self) -> bool {
        self.applied.is_empty()
    }
}

impl fmt::Display for PartialRestore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let applied: Vec<&str> = self.applied.keys().map(|k| k.as_str()).collect();
        let not_applied: Vec<&str> = self.not_applied.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "Restore stopped at '{}': {} (applied: [{}]; not applied: [{}])",
            self.failed,
            self.reason,
            applied.join(", "),
            not_applied.join(", ")
        )?;
        if self.permission_denied {
            write!(f, " - try running as administrator")?;
        }
        Ok(())
    }
}

impl MouseError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for devices
    pub fn device_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Device",
            identifier: identifier.into(),
        }
    }

    /// Create a write error for a path
    pub fn write(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a corruption error for a path
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::CorruptSnapshot {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a corruption error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptSnapshot { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The partial restore breakdown, if this is one
    pub fn as_partial_restore(&self) -> Option<&PartialRestore> {
        match self {
            Self::PartialRestore(partial) => Some(partial),
            _ => None,
        }
    }
}

impl From<PartialRestore> for MouseError {
    fn from(partial: PartialRestore) -> Self {
        Self::PartialRestore(Box::new(partial))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for MouseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MouseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Mouse Manager operations
pub type MouseResult<T> = Result<T, MouseError>;
