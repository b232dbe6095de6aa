//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod devices;
pub mod logs;
pub mod settings;

pub use backup::{handle_backup_command, BackupCommands};
pub use devices::handle_devices_command;
pub use logs::handle_logs_command;
pub use settings::{handle_settings_command, SettingsCommands};
