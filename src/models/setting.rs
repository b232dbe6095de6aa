//! Setting keys and values
//!
//! A settings mapping pairs each known mouse setting with a primitive value.
//! Keys are ordered by declaration; that order is also the order in which a
//! restore applies them to the system.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MouseError;

/// A mouse setting that can be captured and restored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Pointer speed (1-20)
    PointerSpeed,
    /// Whether pointer acceleration ("enhance pointer precision") is on
    Acceleration,
    /// First acceleration threshold (0-20)
    AccelerationThreshold1,
    /// Second acceleration threshold (0-20)
    AccelerationThreshold2,
    /// Acceleration factor (0-3)
    AccelerationFactor,
    /// Double-click interval in milliseconds (100-900)
    DoubleClickTime,
    /// Whether primary and secondary buttons are swapped
    SwapButtons,
    /// Lines scrolled per wheel notch (1-100)
    WheelScrollLines,
    /// Hover time in milliseconds (100-2000)
    HoverTime,
}

/// The kind of value a setting holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean flag
    Bool,
    /// Integer within an inclusive range
    Int { min: i64, max: i64 },
}

impl SettingKey {
    /// Every key, in application order
    pub const ALL: [SettingKey; 9] = [
        SettingKey::PointerSpeed,
        SettingKey::Acceleration,
        SettingKey::AccelerationThreshold1,
        SettingKey::AccelerationThreshold2,
        SettingKey::AccelerationFactor,
        SettingKey::DoubleClickTime,
        SettingKey::SwapButtons,
        SettingKey::WheelScrollLines,
        SettingKey::HoverTime,
    ];

    /// The serialized name of this key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerSpeed => "pointer_speed",
            Self::Acceleration => "acceleration",
            Self::AccelerationThreshold1 => "acceleration_threshold1",
            Self::AccelerationThreshold2 => "acceleration_threshold2",
            Self::AccelerationFactor => "acceleration_factor",
            Self::DoubleClickTime => "double_click_time",
            Self::SwapButtons => "swap_buttons",
            Self::WheelScrollLines => "wheel_scroll_lines",
            Self::HoverTime => "hover_time",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::PointerSpeed => "Pointer speed",
            Self::Acceleration => "Acceleration",
            Self::AccelerationThreshold1 => "Acceleration threshold 1",
            Self::AccelerationThreshold2 => "Acceleration threshold 2",
            Self::AccelerationFactor => "Acceleration factor",
            Self::DoubleClickTime => "Double-click time",
            Self::SwapButtons => "Swap buttons",
            Self::WheelScrollLines => "Wheel scroll lines",
            Self::HoverTime => "Hover time",
        }
    }

    /// The kind of value this key accepts
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Acceleration | Self::SwapButtons => ValueKind::Bool,
            Self::PointerSpeed => ValueKind::Int { min: 1, max: 20 },
            Self::AccelerationThreshold1 | Self::AccelerationThreshold2 => {
                ValueKind::Int { min: 0, max: 20 }
            }
            Self::AccelerationFactor => ValueKind::Int { min: 0, max: 3 },
            Self::DoubleClickTime => ValueKind::Int { min: 100, max: 900 },
            Self::WheelScrollLines => ValueKind::Int { min: 1, max: 100 },
            Self::HoverTime => ValueKind::Int { min: 100, max: 2000 },
        }
    }

    /// Check that a value has the right kind and lies within range
    pub fn validate(&self, value: &SettingValue) -> Result<(), MouseError> {
        match (self.kind(), value) {
            (ValueKind::Bool, SettingValue::Bool(_)) => Ok(()),
            (ValueKind::Int { min, max }, SettingValue::Int(v)) => {
                if (min..=max).contains(v) {
                    Ok(())
                } else {
                    Err(MouseError::Validation(format!(
                        "{} must be between {} and {}, got {}",
                        self, min, max, v
                    )))
                }
            }
            (kind, value) => Err(MouseError::Validation(format!(
                "{} expects {}, got '{}'",
                self,
                kind.describe(),
                value
            ))),
        }
    }

    /// Parse a value typed on the command line for this key
    pub fn parse_value(&self, input: &str) -> Result<SettingValue, MouseError> {
        let input = input.trim();
        let value = match self.kind() {
            ValueKind::Bool => match input.to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => SettingValue::Bool(true),
                "false" | "off" | "no" | "0" => SettingValue::Bool(false),
                _ => {
                    return Err(MouseError::Validation(format!(
                        "{} expects on/off, got '{}'",
                        self, input
                    )))
                }
            },
            ValueKind::Int { .. } => input.parse::<i64>().map(SettingValue::Int).map_err(|_| {
                MouseError::Validation(format!("{} expects a number, got '{}'", self, input))
            })?,
        };
        self.validate(&value)?;
        Ok(value)
    }
}

impl ValueKind {
    fn describe(&self) -> String {
        match self {
            Self::Bool => "on/off".to_string(),
            Self::Int { min, max } => format!("a number between {} and {}", min, max),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = MouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pointer_speed" | "speed" => Ok(Self::PointerSpeed),
            "acceleration" | "accel" => Ok(Self::Acceleration),
            "acceleration_threshold1" | "threshold1" => Ok(Self::AccelerationThreshold1),
            "acceleration_threshold2" | "threshold2" => Ok(Self::AccelerationThreshold2),
            "acceleration_factor" | "factor" => Ok(Self::AccelerationFactor),
            "double_click_time" | "double_click" | "dblclick" => Ok(Self::DoubleClickTime),
            "swap_buttons" | "swap" => Ok(Self::SwapButtons),
            "wheel_scroll_lines" | "scroll_lines" | "scroll" => Ok(Self::WheelScrollLines),
            "hover_time" | "hover" => Ok(Self::HoverTime),
            _ => Err(MouseError::Validation(format!("Unknown setting: {}", s))),
        }
    }
}

/// A primitive setting value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("on"),
            Self::Bool(false) => f.write_str("off"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// An ordered mapping from setting to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsValues(BTreeMap<SettingKey, SettingValue>);

impl SettingsValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, key: SettingKey, value: impl Into<SettingValue>) -> Option<SettingValue> {
        self.0.insert(key, value.into())
    }

    pub fn get(&self, key: SettingKey) -> Option<&SettingValue> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: SettingKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn remove(&mut self, key: SettingKey) -> Option<SettingValue> {
        self.0.remove(&key)
    }

    /// Keys in application order
    pub fn keys(&self) -> impl Iterator<Item = SettingKey> + '_ {
        self.0.keys().copied()
    }

    /// Entries in application order
    pub fn iter(&self) -> btree_map::Iter<'_, SettingKey, SettingValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validate every entry against its key's range
    pub fn validate(&self) -> Result<(), MouseError> {
        for (key, value) in self.iter() {
            key.validate(value)?;
        }
        Ok(())
    }
}

impl FromIterator<(SettingKey, SettingValue)> for SettingsValues {
    fn from_iter<I: IntoIterator<Item = (SettingKey, SettingValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SettingsValues {
    type Item = (&'a SettingKey, &'a SettingValue);
    type IntoIter = btree_map::Iter<'a, SettingKey, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SettingsValues {
    type Item = (SettingKey, SettingValue);
    type IntoIter = btree_map::IntoIter<SettingKey, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_is_application_order() {
        let mut sorted = SettingKey::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, SettingKey::ALL.to_vec());
    }

    #[test]
    fn test_key_serializes_snake_case() {
        let mut values = SettingsValues::new();
        values.insert(SettingKey::DoubleClickTime, 400);
        values.insert(SettingKey::SwapButtons, false);

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"double_click_time":400,"swap_buttons":false}"#);

        let back: SettingsValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = serde_json::from_str::<SettingsValues>(r#"{"pointer_sped":10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!("speed".parse::<SettingKey>().unwrap(), SettingKey::PointerSpeed);
        assert_eq!("double-click".parse::<SettingKey>().unwrap(), SettingKey::DoubleClickTime);
        assert_eq!("SWAP".parse::<SettingKey>().unwrap(), SettingKey::SwapButtons);
        assert!("brightness".parse::<SettingKey>().is_err());
    }

    #[test]
    fn test_parse_value_ranges() {
        assert_eq!(
            SettingKey::PointerSpeed.parse_value("15").unwrap(),
            SettingValue::Int(15)
        );
        assert!(SettingKey::PointerSpeed.parse_value("21").is_err());
        assert!(SettingKey::DoubleClickTime.parse_value("fast").is_err());
        assert_eq!(
            SettingKey::SwapButtons.parse_value("on").unwrap(),
            SettingValue::Bool(true)
        );
    }

    #[test]
    fn test_validate_rejects_wrong_kind() {
        let err = SettingKey::Acceleration
            .validate(&SettingValue::Int(1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_untagged_value_round_trip() {
        let values: Vec<SettingValue> =
            serde_json::from_str(r#"[true, 7, "medium"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SettingValue::Bool(true),
                SettingValue::Int(7),
                SettingValue::Text("medium".into())
            ]
        );
    }
}
