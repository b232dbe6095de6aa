//! Core data models for Mouse Manager
//!
//! Setting keys and values, the typed settings view, and the device model.

pub mod device;
pub mod mouse;
pub mod setting;

pub use device::{ConnectionType, MouseDevice};
pub use mouse::{AccelerationLevel, MouseSettings};
pub use setting::{SettingKey, SettingValue, SettingsValues, ValueKind};
