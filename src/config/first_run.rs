//! First-run marker
//!
//! A marker file records that the welcome message has been shown.

use std::fs;
use std::path::PathBuf;

use super::paths::MousePaths;
use crate::error::MouseError;

/// Welcome text shown once on first launch
pub const WELCOME_MESSAGE: &str = "\
Welcome to Mouse Manager!

Manage and configure every mouse connected to this computer.

  - Automatic mouse detection
  - Pointer speed and acceleration tuning
  - Backup and restore of mouse settings
  - Detailed device information

Run 'mousemgr devices' (or press 'r' in the TUI) to get started.";

/// Tracks whether the application has run before
#[derive(Debug, Clone)]
pub struct FirstRun {
    marker: PathBuf,
}

impl FirstRun {
    pub fn new(paths: &MousePaths) -> Self {
        Self {
            marker: paths.first_run_marker(),
        }
    }

    /// True until `mark_done` has been called once
    pub fn is_first_run(&self) -> bool {
        !self.marker.exists()
    }

    /// Create the marker file
    pub fn mark_done(&self) -> Result<(), MouseError> {
        if let Some(parent) = self.marker.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| MouseError::Io(format!("Failed to create config directory: {}", e)))?;
        }
        fs::write(&self.marker, b"")
            .map_err(|e| MouseError::Io(format!("Failed to write first-run marker: {}", e)))
    }

    /// Return the welcome message on the first call and record that it was shown
    pub fn take_welcome(&self) -> Result<Option<&'static str>, MouseError> {
        if !self.is_first_run() {
            return Ok(None);
        }
        self.mark_done()?;
        tracing::info!("First run - welcome message shown");
        Ok(Some(WELCOME_MESSAGE))
    }
}
