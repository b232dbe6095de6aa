//! Mouse Manager - mouse detection and pointer settings with versioned backups
//!
//! This library provides the core of the `mousemgr` tool: it finds the mice
//! attached to the machine, reads and changes the system pointer settings,
//! and keeps checksummed JSON backups of those settings that can be restored
//! later, all or nothing as far as the OS allows.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, user settings and the first-run marker
//! - `error`: Custom error types
//! - `models`: Setting keys and values, typed settings, devices
//! - `storage`: Atomic JSON file helpers
//! - `backup`: Snapshots, the backup store, retention and the restore engine
//! - `system`: Reading and writing the live settings (Win32 or simulated)
//! - `devices`: HID mouse enumeration with a short-lived cache
//! - `logging`: `tracing` setup and the log reader
//! - `services`: The layer both front ends talk to
//! - `cli`, `display`, `tui`: Front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use mouse_manager::config::{MousePaths, Settings};
//! use mouse_manager::services::Services;
//!
//! let paths = MousePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let services = Services::for_platform(paths, settings);
//! let record = services.backups().create(BackupKind::Manual)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod devices;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod system;
pub mod tui;

pub use error::{MouseError, MouseResult};
