//! Display formatting for terminal output
//!
//! Formats devices, settings, backups and log entries for the CLI. Lists are
//! rendered as `tabled` tables; detail views are aligned label/value lines.

pub mod backup;
pub mod device;
pub mod logs;
pub mod settings;

pub use backup::{format_backup_details, format_backup_list, format_size, format_verify_results};
pub use device::{format_device_details, format_device_list};
pub use logs::format_log_entries;
pub use settings::{format_applied, format_keys, format_settings, format_values};
