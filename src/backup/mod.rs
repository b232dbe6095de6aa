//! Backup system for Mouse Manager
//!
//! Snapshots of the mouse configuration are stored as checksummed JSON files
//! and restored through a single serialized engine.
//!
//! # Architecture
//!
//! - `SettingsSnapshot`: immutable, checksummed settings record
//! - `BackupStore`: owns the backup directory (save, list, load, prune)
//! - `RetentionPolicy`: decides which old backups to delete or compress
//! - `RestoreEngine`: validates a backup and applies it to the live system
//!
//! # Backup Format
//!
//! `backup_<YYYYMMDD_HHMMSS>[_<n>].json`, optionally gzip-compressed as
//! `.json.gz`:
//! - `schema_version`: version for migration support
//! - `kind`: `manual`, `pre_restore` or `pre_change`
//! - `timestamp`: UTC capture time
//! - `values`: setting name to value
//! - `checksum`: hex SHA-256 of the compact JSON of `values`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mouse_manager::backup::{BackupStore, RestoreEngine, SettingsSnapshot};
//! use mouse_manager::system::{self, SystemSettings};
//!
//! let system = system::platform_default();
//! let store = Arc::new(BackupStore::new(paths.backup_dir()));
//!
//! let record = store.save(&SettingsSnapshot::capture(system.get_current()?)?)?;
//!
//! // Later, restore it
//! let engine = RestoreEngine::new(store, system);
//! let outcome = engine.restore(&record)?;
//! println!("{}", outcome.summary());
//! ```

mod restore;
mod retention;
mod snapshot;
mod store;

pub use restore::{is_untouched, RestoreEngine, RestoreOutcome, RestoreState};
pub use retention::{PrunePlan, RetentionPolicy};
pub use snapshot::{
    compute_checksum, parse_timestamp, BackupKind, SettingsSnapshot, SCHEMA_VERSION,
    TIMESTAMP_FORMAT,
};
pub use store::{BackupRecord, BackupStore, PruneReport};
