//! Typed mouse settings
//!
//! `MouseSettings` is the typed counterpart of a `SettingsValues` mapping,
//! used for defaults, presets and display.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::setting::{SettingKey, SettingValue, SettingsValues};

/// Acceleration presets offered by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccelerationLevel {
    Disabled,
    Low,
    #[default]
    Medium,
    High,
}

impl AccelerationLevel {
    /// (threshold1, threshold2, factor) for this level
    pub fn parameters(&self) -> (i64, i64, i64) {
        match self {
            Self::Disabled => (0, 0, 0),
            Self::Low => (4, 8, 1),
            Self::Medium => (6, 10, 1),
            Self::High => (8, 12, 2),
        }
    }

    /// Parse a level name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "off" | "none" => Some(Self::Disabled),
            "low" => Some(Self::Low),
            "medium" | "default" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// The settings this preset changes
    pub fn to_values(&self) -> SettingsValues {
        let (t1, t2, factor) = self.parameters();
        let mut values = SettingsValues::new();
        values.insert(SettingKey::Acceleration, factor > 0);
        values.insert(SettingKey::AccelerationThreshold1, t1);
        values.insert(SettingKey::AccelerationThreshold2, t2);
        values.insert(SettingKey::AccelerationFactor, factor);
        values
    }
}

impl fmt::Display for AccelerationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A complete set of mouse settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseSettings {
    pub pointer_speed: i64,
    pub acceleration: bool,
    pub acceleration_threshold1: i64,
    pub acceleration_threshold2: i64,
    pub acceleration_factor: i64,
    pub double_click_time: i64,
    pub swap_buttons: bool,
    pub wheel_scroll_lines: i64,
    pub hover_time: i64,
}

impl Default for MouseSettings {
    /// Windows out-of-the-box values
    fn default() -> Self {
        Self {
            pointer_speed: 10,
            acceleration: true,
            acceleration_threshold1: 6,
            acceleration_threshold2: 10,
            acceleration_factor: 1,
            double_click_time: 500,
            swap_buttons: false,
            wheel_scroll_lines: 3,
            hover_time: 400,
        }
    }
}

impl MouseSettings {
    /// Convert into a full settings mapping
    pub fn to_values(&self) -> SettingsValues {
        let mut values = SettingsValues::new();
        values.insert(SettingKey::PointerSpeed, self.pointer_speed);
        values.insert(SettingKey::Acceleration, self.acceleration);
        values.insert(SettingKey::AccelerationThreshold1, self.acceleration_threshold1);
        values.insert(SettingKey::AccelerationThreshold2, self.acceleration_threshold2);
        values.insert(SettingKey::AccelerationFactor, self.acceleration_factor);
        values.insert(SettingKey::DoubleClickTime, self.double_click_time);
        values.insert(SettingKey::SwapButtons, self.swap_buttons);
        values.insert(SettingKey::WheelScrollLines, self.wheel_scroll_lines);
        values.insert(SettingKey::HoverTime, self.hover_time);
        values
    }

    /// Build from a mapping, falling back to defaults for missing or mistyped entries
    pub fn from_values(values: &SettingsValues) -> Self {
        let defaults = Self::default();
        let int = |key: SettingKey, fallback: i64| {
            values.get(key).and_then(SettingValue::as_int).unwrap_or(fallback)
        };
        let flag = |key: SettingKey, fallback: bool| {
            values.get(key).and_then(SettingValue::as_bool).unwrap_or(fallback)
        };

        Self {
            pointer_speed: int(SettingKey::PointerSpeed, defaults.pointer_speed),
            acceleration: flag(SettingKey::Acceleration, defaults.acceleration),
            acceleration_threshold1: int(
                SettingKey::AccelerationThreshold1,
                defaults.acceleration_threshold1,
            ),
            acceleration_threshold2: int(
                SettingKey::AccelerationThreshold2,
                defaults.acceleration_threshold2,
            ),
            acceleration_factor: int(SettingKey::AccelerationFactor, defaults.acceleration_factor),
            double_click_time: int(SettingKey::DoubleClickTime, defaults.double_click_time),
            swap_buttons: flag(SettingKey::SwapButtons, defaults.swap_buttons),
            wheel_scroll_lines: int(SettingKey::WheelScrollLines, defaults.wheel_scroll_lines),
            hover_time: int(SettingKey::HoverTime, defaults.hover_time),
        }
    }

    /// The preset matching the current acceleration parameters, if any
    pub fn acceleration_level(&self) -> Option<AccelerationLevel> {
        let current = (
            self.acceleration_threshold1,
            self.acceleration_threshold2,
            self.acceleration_factor,
        );
        [
            AccelerationLevel::Disabled,
            AccelerationLevel::Low,
            AccelerationLevel::Medium,
            AccelerationLevel::High,
        ]
        .into_iter()
        .find(|level| level.parameters() == current)
    }

    /// Label/value pairs for display
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let acceleration = match (self.acceleration, self.acceleration_level()) {
            (false, _) => "Disabled".to_string(),
            (true, Some(level)) => format!("Enabled ({})", level),
            (true, None) => format!(
                "Enabled ({}/{}/{})",
                self.acceleration_threshold1, self.acceleration_threshold2, self.acceleration_factor
            ),
        };

        vec![
            ("Pointer speed", format!("{}/20", self.pointer_speed)),
            ("Acceleration", acceleration),
            ("Double click", format!("{}ms", self.double_click_time)),
            (
                "Buttons swapped",
                if self.swap_buttons { "Yes" } else { "No" }.to_string(),
            ),
            ("Scroll lines", format!("{} lines", self.wheel_scroll_lines)),
            ("Hover time", format!("{}ms", self.hover_time)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let values = MouseSettings::default().to_values();
        assert_eq!(values.len(), SettingKey::ALL.len());
        values.validate().unwrap();
    }

    #[test]
    fn test_values_round_trip() {
        let settings = MouseSettings {
            pointer_speed: 14,
            swap_buttons: true,
            ..MouseSettings::default()
        };
        assert_eq!(MouseSettings::from_values(&settings.to_values()), settings);
    }

    #[test]
    fn test_from_partial_values_uses_defaults() {
        let mut values = SettingsValues::new();
        values.insert(SettingKey::PointerSpeed, 3);

        let settings = MouseSettings::from_values(&values);
        assert_eq!(settings.pointer_speed, 3);
        assert_eq!(settings.double_click_time, 500);
    }

    #[test]
    fn test_acceleration_presets() {
        assert_eq!(AccelerationLevel::parse("HIGH"), Some(AccelerationLevel::High));
        assert_eq!(AccelerationLevel::parse("turbo"), None);

        let values = AccelerationLevel::Disabled.to_values();
        assert_eq!(values.get(SettingKey::Acceleration), Some(&SettingValue::Bool(false)));
        values.validate().unwrap();

        assert_eq!(
            MouseSettings::default().acceleration_level(),
            Some(AccelerationLevel::Medium)
        );
    }

    #[test]
    fn test_summary_mentions_preset() {
        let summary = MouseSettings::default().summary();
        let accel = summary.iter().find(|(label, _)| *label == "Acceleration").unwrap();
        assert_eq!(accel.1, "Enabled (medium)");
    }
}
