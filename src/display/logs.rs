//! Log display formatting

use crate::logging::LogEntry;

/// One line per entry: time, level, message, fields
pub fn format_log_entries(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "No log entries.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        let fields = entry.fields_summary();
        output.push_str(&format!(
            "{} {:<5} {}{}{}\n",
            entry.timestamp,
            entry.level,
            entry.message,
            if fields.is_empty() { "" } else { "  " },
            fields
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_format_entries() {
        let mut fields = BTreeMap::new();
        fields.insert("backup".to_string(), serde_json::json!("backup_x.json"));
        let entry = LogEntry {
            timestamp: "2025-01-10T09:30:00Z".into(),
            level: "INFO".into(),
            target: "mouse_manager".into(),
            message: "Backup saved".into(),
            fields,
        };

        assert_eq!(
            format_log_entries(&[entry]),
            "2025-01-10T09:30:00Z INFO  Backup saved  backup=backup_x.json\n"
        );
        assert_eq!(format_log_entries(&[]), "No log entries.");
    }
}
