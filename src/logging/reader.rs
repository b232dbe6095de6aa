//! Log reader
//!
//! Reads the JSON-lines log files back for the `logs` command and the TUI
//! Logs tab. Lines that aren't valid log records are skipped.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::LOG_FILE_PREFIX;
use crate::error::{MouseError, MouseResult};

/// One record from the log file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub message: String,
    /// Structured fields other than the message
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    /// `key=value` pairs for display
    pub fn fields_summary(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `HH:MM:SS` part of the timestamp, or the whole timestamp if it has none
    pub fn short_time(&self) -> &str {
        self.timestamp
            .split_once('T')
            .map(|(_, time)| time.get(..8).unwrap_or(time))
            .unwrap_or(&self.timestamp)
    }
}

/// Reads entries from a log directory
#[derive(Debug, Clone)]
pub struct LogReader {
    dir: PathBuf,
}

impl LogReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Log files, newest first
    pub fn files(&self) -> MouseResult<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)
            .map_err(|e| MouseError::Io(format!("Failed to read log directory: {}", e)))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(LOG_FILE_PREFIX) && n.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();

        // Dated names sort chronologically
        files.sort();
        files.reverse();
        Ok(files)
    }

    /// The most recent `count` entries across all files, oldest first
    pub fn read_recent(&self, count: usize) -> MouseResult<Vec<LogEntry>> {
        let mut collected: Vec<Vec<LogEntry>> = Vec::new();
        let mut total = 0;

        for path in self.files()? {
            if total >= count {
                break;
            }
            let entries = read_file(&path)?;
            total += entries.len();
            collected.push(entries);
        }

        let all: Vec<LogEntry> = collected.into_iter().rev().flatten().collect();
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }
}

fn read_file(path: &Path) -> MouseResult<Vec<LogEntry>> {
    let file = File::open(path)
        .map_err(|e| MouseError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(entry) = serde_json::from_str::<LogEntry>(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn line(time: &str, level: &str, message: &str) -> String {
        format!(
            r#"{{"timestamp":"{}","level":"{}","message":"{}","backup":"backup_x.json","target":"mouse_manager::backup::store"}}"#,
            time, level, message
        )
    }

    fn write_log(dir: &Path, date: &str, lines: &[String]) {
        fs::write(
            dir.join(format!("{}.{}.log", LOG_FILE_PREFIX, date)),
            lines.join("\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_parses_flattened_json() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            "2025-01-10",
            &[line("2025-01-10T09:30:00.123Z", "INFO", "Backup saved")],
        );

        let entries = LogReader::new(temp.path()).read_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, "INFO");
        assert_eq!(entries[0].message, "Backup saved");
        assert_eq!(entries[0].target, "mouse_manager::backup::store");
        assert_eq!(entries[0].fields_summary(), "backup=backup_x.json");
        assert_eq!(entries[0].short_time(), "09:30:00");
    }

    #[test]
    fn test_recent_spans_files_in_order() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            "2025-01-09",
            &[
                line("2025-01-09T10:00:00Z", "INFO", "one"),
                line("2025-01-09T11:00:00Z", "WARN", "two"),
            ],
        );
        write_log(
            temp.path(),
            "2025-01-10",
            &[line("2025-01-10T08:00:00Z", "ERROR", "three")],
        );

        let entries = LogReader::new(temp.path()).read_recent(2).unwrap();
        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_skips_garbage_and_foreign_files() {
        let temp = TempDir::new().unwrap();
        write_log(
            temp.path(),
            "2025-01-10",
            &[
                "not json".to_string(),
                line("2025-01-10T08:00:00Z", "INFO", "ok"),
            ],
        );
        fs::write(temp.path().join("other.txt"), line("x", "INFO", "nope")).unwrap();

        let reader = LogReader::new(temp.path());
        assert_eq!(reader.files().unwrap().len(), 1);
        assert_eq!(reader.read_recent(10).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let reader = LogReader::new(temp.path().join("logs"));
        assert!(reader.read_recent(5).unwrap().is_empty());
    }
}
