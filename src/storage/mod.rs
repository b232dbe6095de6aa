//! Storage helpers for Mouse Manager
//!
//! Atomic JSON file writes shared by the settings file and the backup store.

pub mod file_io;

pub use file_io::{read_json_required, write_json_atomic, write_temp_in};
