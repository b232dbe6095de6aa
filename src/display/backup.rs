//! Backup display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::{BackupRecord, SettingsSnapshot};
use crate::services::backup::VerifyResult;

use super::settings::format_values;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File")]
    filename: String,
    #[tabled(rename = "Created (UTC)")]
    created: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Format backups (newest first) as a table
pub fn format_backup_list(records: &[BackupRecord], verbose: bool) -> String {
    if records.is_empty() {
        return "No backups found.".to_string();
    }

    let rows = records.iter().enumerate().map(|(i, r)| BackupRow {
        index: i + 1,
        filename: r.filename.clone(),
        created: r.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        size: if r.compressed {
            format!("{} (gz)", format_size(r.size_bytes))
        } else {
            format_size(r.size_bytes)
        },
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');

    if verbose {
        if let Some(dir) = records[0].path.parent() {
            output.push_str(&format!("Location: {}\n", dir.display()));
        }
        let total: u64 = records.iter().map(|r| r.size_bytes).sum();
        output.push_str(&format!("Total size: {}\n", format_size(total)));
    }
    output.push_str(&format!("{} backup(s)\n", records.len()));

    output
}

/// Format a backup and its contents
pub fn format_backup_details(record: &BackupRecord, snapshot: &SettingsSnapshot) -> String {
    let mut output = String::new();

    output.push_str(&format!("Backup:    {}\n", record.filename));
    output.push_str(&format!("Path:      {}\n", record.path.display()));
    output.push_str(&format!(
        "Created:   {}\n",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Kind:      {}\n", snapshot.kind()));
    output.push_str(&format!("Schema:    v{}\n", snapshot.schema_version()));
    output.push_str(&format!("Size:      {}\n", format_size(record.size_bytes)));
    output.push_str(&format!("Checksum:  {} (valid)\n", snapshot.checksum()));
    output.push('\n');
    output.push_str(&format_values(snapshot.values()));
    output.push('\n');

    output
}

/// One line per verified backup
pub fn format_verify_results(results: &[VerifyResult]) -> String {
    if results.is_empty() {
        return "No backups found.".to_string();
    }

    let mut output = String::new();
    for result in results {
        match &result.error {
            None => output.push_str(&format!("  OK       {}\n", result.record.filename)),
            Some(e) => output.push_str(&format!("  CORRUPT  {}: {}\n", result.record.filename, e)),
        }
    }

    let bad = results.iter().filter(|r| !r.is_ok()).count();
    output.push_str(&format!(
        "\n{} checked, {} corrupt\n",
        results.len(),
        bad
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn record(compressed: bool) -> BackupRecord {
        BackupRecord {
            filename: "backup_20250110_093000.json".into(),
            path: PathBuf::from("/data/backups/backup_20250110_093000.json"),
            timestamp: "20250110_093000".into(),
            sequence: 0,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap(),
            size_bytes: 2048,
            compressed,
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_backup_list() {
        let output = format_backup_list(&[record(false), record(true)], true);
        assert!(output.contains("backup_20250110_093000.json"));
        assert!(output.contains("2025-01-10 09:30:00"));
        assert!(output.contains("(gz)"));
        assert!(output.contains("Location: /data/backups"));
        assert!(output.contains("2 backup(s)"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_backup_list(&[], false), "No backups found.");
    }
}
