//! Configuration module for Mouse Manager
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - The first-run marker

pub mod first_run;
pub mod paths;
pub mod settings;

pub use first_run::FirstRun;
pub use paths::MousePaths;
pub use settings::{LogSettings, Settings};
