//! System settings collaborator
//!
//! Reads and writes the live OS mouse parameters. The restore engine and the
//! settings service only ever talk to the `SystemSettings` trait.

mod memory;
#[cfg(windows)]
mod win32;

use std::sync::Arc;

use thiserror::Error;

use crate::error::{MouseError, MouseResult};
use crate::models::{SettingKey, SettingValue, SettingsValues};

pub use memory::MemorySystemSettings;
#[cfg(windows)]
pub use win32::WindowsSystemSettings;

/// Why a single setting could not be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The OS refused the write
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The OS call failed for another reason
    #[error("rejected by the system: {0}")]
    Rejected(String),

    /// The value has the wrong kind or is out of range
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl ApplyError {
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

impl From<MouseError> for ApplyError {
    fn from(err: MouseError) -> Self {
        match err {
            MouseError::Validation(reason) => Self::InvalidValue(reason),
            MouseError::Permission { reason, .. } => Self::PermissionDenied(reason),
            other => Self::Rejected(other.to_string()),
        }
    }
}

/// Access to the live mouse configuration
pub trait SystemSettings: Send + Sync {
    /// Read every supported setting
    fn get_current(&self) -> MouseResult<SettingsValues>;

    /// Write one setting
    fn apply(&self, key: SettingKey, value: &SettingValue) -> Result<(), ApplyError>;

    /// Short backend description for status lines
    fn name(&self) -> &'static str;

    /// Whether writes are expected to need elevation
    fn requires_admin(&self) -> bool {
        false
    }

    /// Pixels the pointer must travel before a drag starts, as (width, height)
    fn drag_area(&self) -> Option<(u32, u32)> {
        None
    }

    fn dpi_aware(&self) -> Option<bool> {
        None
    }

    /// Snapshot of the read-only host facts
    fn info(&self) -> SystemInfo {
        SystemInfo {
            backend: self.name(),
            admin_required: self.requires_admin(),
            drag_area: self.drag_area(),
            dpi_aware: self.dpi_aware(),
        }
    }
}

/// Read-only facts about the host, never captured in backups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfo {
    pub backend: &'static str,
    /// The process lacks the elevation some writes need
    pub admin_required: bool,
    pub drag_area: Option<(u32, u32)>,
    pub dpi_aware: Option<bool>,
}

impl SystemInfo {
    /// Label/value pairs for display, skipping unknown facts
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some((width, height)) = self.drag_area {
            rows.push(("Drag area", format!("{}x{}px", width, height)));
        }
        if let Some(aware) = self.dpi_aware {
            rows.push(("DPI aware", if aware { "Yes" } else { "No" }.to_string()));
        }
        rows
    }
}

/// The backend for this platform
#[cfg(windows)]
pub fn platform_default() -> Arc<dyn SystemSettings> {
    Arc::new(WindowsSystemSettings::new())
}

/// The backend for this platform
#[cfg(not(windows))]
pub fn platform_default() -> Arc<dyn SystemSettings> {
    Arc::new(MemorySystemSettings::default())
}
