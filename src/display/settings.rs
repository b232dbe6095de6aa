//! Settings display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{MouseSettings, SettingKey, SettingsValues};
use crate::system::SystemInfo;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format the live settings summary followed by the read-only host facts
pub fn format_settings(settings: &MouseSettings, info: &SystemInfo) -> String {
    let rows = settings
        .summary()
        .into_iter()
        .chain(info.summary())
        .map(|(label, value)| SettingRow { label, value });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Setting")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format raw values, one row per key
pub fn format_values(values: &SettingsValues) -> String {
    if values.is_empty() {
        return "No settings.".to_string();
    }

    let rows = values.iter().map(|(key, value)| ValueRow {
        key: key.as_str(),
        label: key.label(),
        value: value.to_string(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One line per key, e.g. `pointer_speed = 12`
pub fn format_applied(values: &SettingsValues) -> String {
    values
        .iter()
        .map(|(key, value)| format!("  {} = {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-separated key names
pub fn format_keys(keys: &[SettingKey]) -> String {
    keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_table() {
        let info = SystemInfo {
            backend: "simulated",
            admin_required: false,
            drag_area: Some((4, 4)),
            dpi_aware: None,
        };
        let output = format_settings(&MouseSettings::default(), &info);
        assert!(output.contains("Pointer speed"));
        assert!(output.contains("10/20"));
        assert!(output.contains("Enabled (medium)"));
        assert!(output.contains("Drag area"));
        assert!(output.contains("4x4px"));
        assert!(!output.contains("DPI aware"));
    }

    #[test]
    fn test_values_table() {
        let mut values = SettingsValues::new();
        values.insert(SettingKey::SwapButtons, true);
        let output = format_values(&values);
        assert!(output.contains("swap_buttons"));
        assert!(output.contains("on"));
    }

    #[test]
    fn test_applied_lines() {
        let mut values = SettingsValues::new();
        values.insert(SettingKey::PointerSpeed, 12);
        assert_eq!(format_applied(&values), "  pointer_speed = 12");
        assert_eq!(
            format_keys(&[SettingKey::PointerSpeed, SettingKey::HoverTime]),
            "pointer_speed, hover_time"
        );
    }
}
