//! Backup store for Mouse Manager
//!
//! Persists snapshots as `backup_<timestamp>[_<n>].json` files in a single
//! directory that no other component writes to. Writes go to a temp file
//! first and are renamed into place without ever replacing an existing
//! backup.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::retention::RetentionPolicy;
use super::snapshot::{parse_timestamp, SettingsSnapshot};
use crate::error::{MouseError, MouseResult};
use crate::storage::file_io::write_temp_in;

const FILE_PREFIX: &str = "backup_";
const JSON_SUFFIX: &str = ".json";
const GZIP_SUFFIX: &str = ".json.gz";

/// A backup file and the metadata encoded in its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Snapshot timestamp (`YYYYMMDD_HHMMSS`)
    pub timestamp: String,
    /// Collision counter; 0 for the first backup in a given second
    pub sequence: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Whether the file is gzip-compressed
    pub compressed: bool,
}

/// Outcome of a prune run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    /// Backups deleted, oldest first
    pub removed: Vec<PathBuf>,
    /// Backups compressed, oldest first (paths of the new `.json.gz` files)
    pub compressed: Vec<PathBuf>,
}

impl PruneReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.compressed.is_empty()
    }
}

/// Owns the backup directory
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get backup directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a snapshot to a new file
    ///
    /// Never overwrites: if `backup_<timestamp>.json` exists, `_1`, `_2`, ...
    /// are tried in turn.
    pub fn save(&self, snapshot: &SettingsSnapshot) -> MouseResult<BackupRecord> {
        match self.save_inner(snapshot) {
            Ok(record) => {
                info!(
                    backup = %record.filename,
                    kind = %snapshot.kind(),
                    settings = snapshot.values().len(),
                    "Backup saved"
                );
                Ok(record)
            }
            Err(e) => {
                error!(dir = %self.dir.display(), error = %e, "Backup save failed");
                Err(e)
            }
        }
    }

    fn save_inner(&self, snapshot: &SettingsSnapshot) -> MouseResult<BackupRecord> {
        fs::create_dir_all(&self.dir).map_err(|e| MouseError::write(&self.dir, e))?;

        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| MouseError::Json(format!("Failed to serialize backup: {}", e)))?;

        let mut temp = write_temp_in(&self.dir, &json).map_err(|e| MouseError::write(&self.dir, e))?;

        let mut sequence = 0u32;
        loop {
            let filename = file_name(snapshot.timestamp(), sequence, false);
            let path = self.dir.join(&filename);

            match temp.persist_noclobber(&path) {
                Ok(_) => {
                    return self.record_at(&path).ok_or_else(|| {
                        MouseError::write(&path, "written file has an unrecognised name")
                    });
                }
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(backup = %filename, "Backup name taken, trying next suffix");
                    temp = e.file;
                    sequence += 1;
                }
                Err(e) => return Err(MouseError::write(&path, e.error)),
            }
        }
    }

    /// List all backups, newest first
    ///
    /// Re-reads the directory on every call. Files that don't follow the
    /// backup naming scheme are ignored.
    pub fn list(&self) -> MouseResult<Vec<BackupRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.dir)
            .map_err(|e| MouseError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| MouseError::Io(format!("Failed to read directory entry: {}", e)))?;

            if let Some(record) = self.record_at(&entry.path()) {
                backups.push(record);
            }
        }

        backups.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });

        Ok(backups)
    }

    /// Read and verify a backup
    pub fn load(&self, record: &BackupRecord) -> MouseResult<SettingsSnapshot> {
        let path = &record.path;

        if !path.exists() {
            return Err(MouseError::backup_not_found(&record.filename));
        }

        let bytes = read_backup_bytes(path, record.compressed).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                MouseError::backup_not_found(&record.filename)
            } else if record.compressed {
                MouseError::corrupt(path, format!("cannot decompress: {}", e))
            } else {
                MouseError::Io(format!("Failed to read backup file: {}", e))
            }
        })?;

        let snapshot: SettingsSnapshot = serde_json::from_slice(&bytes)
            .map_err(|e| MouseError::corrupt(path, format!("invalid backup document: {}", e)))?;

        snapshot.verify(path)?;

        Ok(snapshot)
    }

    /// Look up a backup by file name
    pub fn find(&self, filename: &str) -> MouseResult<Option<BackupRecord>> {
        let path = self.dir.join(filename);
        if path.exists() {
            Ok(self.record_at(&path))
        } else {
            Ok(None)
        }
    }

    /// Get the most recent backup
    pub fn latest(&self) -> MouseResult<Option<BackupRecord>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Apply a retention policy
    pub fn prune(&self, policy: &RetentionPolicy) -> MouseResult<PruneReport> {
        self.prune_at(policy, Utc::now())
    }

    /// Apply a retention policy as of `now`
    pub fn prune_at(&self, policy: &RetentionPolicy, now: DateTime<Utc>) -> MouseResult<PruneReport> {
        let backups = self.list()?;
        let plan = policy.plan(&backups, now);
        let mut report = PruneReport::default();

        if plan.is_empty() {
            debug!(total = backups.len(), "Nothing to prune");
            return Ok(report);
        }

        for record in plan.delete {
            fs::remove_file(&record.path).map_err(|e| {
                MouseError::Io(format!("Failed to delete old backup {}: {}", record.filename, e))
            })?;
            report.removed.push(record.path.clone());
        }

        for record in plan.compress {
            match self.compress(record) {
                Ok(path) => report.compressed.push(path),
                Err(e) => warn!(backup = %record.filename, error = %e, "Failed to compress backup"),
            }
        }

        info!(
            removed = report.removed.len(),
            compressed = report.compressed.len(),
            "Backups pruned"
        );

        Ok(report)
    }

    /// Replace a plain backup with a gzip copy
    fn compress(&self, record: &BackupRecord) -> MouseResult<PathBuf> {
        let raw = fs::read(&record.path)
            .map_err(|e| MouseError::Io(format!("Failed to read {}: {}", record.filename, e)))?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw)?;
        let gz = encoder.finish()?;

        let target = self
            .dir
            .join(file_name(&record.timestamp, record.sequence, true));
        let temp = write_temp_in(&self.dir, &gz).map_err(|e| MouseError::write(&self.dir, e))?;
        temp.persist_noclobber(&target)
            .map_err(|e| MouseError::write(&target, e.error))?;

        fs::remove_file(&record.path)?;
        Ok(target)
    }

    /// Build a record from a path, if it names a backup
    pub fn record_at(&self, path: &Path) -> Option<BackupRecord> {
        let filename = path.file_name()?.to_str()?.to_string();
        let (timestamp, sequence, compressed) = parse_file_name(&filename)?;
        let created_at = parse_timestamp(&timestamp)?;

        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }

        Some(BackupRecord {
            filename,
            path: path.to_path_buf(),
            timestamp,
            sequence,
            created_at,
            size_bytes: metadata.len(),
            compressed,
        })
    }
}

fn read_backup_bytes(path: &Path, compressed: bool) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if compressed {
        GzDecoder::new(File::open(path)?).read_to_end(&mut bytes)?;
    } else {
        File::open(path)?.read_to_end(&mut bytes)?;
    }
    Ok(bytes)
}

/// `backup_<timestamp>[_<sequence>].json[.gz]`
fn file_name(timestamp: &str, sequence: u32, compressed: bool) -> String {
    let suffix = if compressed { GZIP_SUFFIX } else { JSON_SUFFIX };
    if sequence == 0 {
        format!("{}{}{}", FILE_PREFIX, timestamp, suffix)
    } else {
        format!("{}{}_{}{}", FILE_PREFIX, timestamp, sequence, suffix)
    }
}

/// Inverse of `file_name`
fn parse_file_name(filename: &str) -> Option<(String, u32, bool)> {
    let rest = filename.strip_prefix(FILE_PREFIX)?;
    let (stem, compressed) = match rest.strip_suffix(GZIP_SUFFIX) {
        Some(stem) => (stem, true),
        None => (rest.strip_suffix(JSON_SUFFIX)?, false),
    };

    // YYYYMMDD_HHMMSS is 15 bytes
    if stem.len() < 15 || !stem.is_char_boundary(15) {
        return None;
    }
    let (timestamp, tail) = stem.split_at(15);
    let sequence = match tail {
        "" => 0,
        _ => tail.strip_prefix('_')?.parse().ok()?,
    };

    Some((timestamp.to_string(), sequence, compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::snapshot::BackupKind;
    use crate::models::{SettingKey, SettingsValues};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn create_test_store() -> (BackupStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = BackupStore::new(temp_dir.path().join("backups"));
        (store, temp_dir)
    }

    fn scenario_values() -> SettingsValues {
        let mut values = SettingsValues::new();
        values.insert(SettingKey::PointerSpeed, 10);
        values.insert(SettingKey::Acceleration, true);
        values.insert(SettingKey::DoubleClickTime, 400);
        values.insert(SettingKey::SwapButtons, false);
        values
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap()
    }

    fn snapshot_at(offset_minutes: i64) -> SettingsSnapshot {
        SettingsSnapshot::capture_at(
            scenario_values(),
            base_time() + Duration::minutes(offset_minutes),
            BackupKind::Manual,
        )
        .unwrap()
    }

    #[test]
    fn test_save_load_round_trip() {
        let (store, _temp) = create_test_store();
        let snapshot = SettingsSnapshot::capture(scenario_values()).unwrap();

        let record = store.save(&snapshot).unwrap();
        assert!(record.path.exists());
        assert_eq!(record.filename, format!("backup_{}.json", snapshot.timestamp()));

        let loaded = store.load(&record).unwrap();
        assert_eq!(loaded.values(), &scenario_values());
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_scenario_newest_first() {
        let (store, _temp) = create_test_store();
        store.save(&snapshot_at(-120)).unwrap();
        store.save(&snapshot_at(-60)).unwrap();
        let newest = store.save(&snapshot_at(0)).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0], newest);
        assert!(listed[1].created_at > listed[2].created_at);

        let loaded = store.load(&listed[0]).unwrap();
        assert_eq!(loaded.values(), &scenario_values());
    }

    #[test]
    fn test_same_second_gets_suffix() {
        let (store, _temp) = create_test_store();
        let snapshot = snapshot_at(0);

        let first = store.save(&snapshot).unwrap();
        let second = store.save(&snapshot).unwrap();
        let third = store.save(&snapshot).unwrap();

        assert_eq!(first.filename, "backup_20250110_093000.json");
        assert_eq!(second.filename, "backup_20250110_093000_1.json");
        assert_eq!(third.filename, "backup_20250110_093000_2.json");

        let listed = store.list().unwrap();
        assert_eq!(listed[0], third);
        assert_eq!(listed[2], first);
    }

    #[test]
    fn test_no_temp_files_left() {
        let (store, _temp) = create_test_store();
        store.save(&snapshot_at(0)).unwrap();
        store.save(&snapshot_at(0)).unwrap();

        let names: Vec<String> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.starts_with("backup_")));
    }

    #[test]
    fn test_single_byte_change_is_corrupt() {
        let (store, _temp) = create_test_store();
        let record = store.save(&snapshot_at(0)).unwrap();

        let original = fs::read_to_string(&record.path).unwrap();
        let tampered = original.replacen("\"double_click_time\": 400", "\"double_click_time\": 500", 1);
        assert_ne!(original, tampered);
        fs::write(&record.path, tampered).unwrap();

        let err = store.load(&record).unwrap_err();
        assert!(err.is_corrupt(), "unexpected error: {}", err);
    }

    #[test]
    fn test_every_byte_in_values_is_covered() {
        let (store, _temp) = create_test_store();
        let record = store.save(&snapshot_at(0)).unwrap();
        let original = fs::read(&record.path).unwrap();

        let values_start = find(&original, b"\"values\"").unwrap();
        let values_end = values_start + find(&original[values_start..], b"}").unwrap();

        for i in values_start..=values_end {
            let mut mutated = original.clone();
            mutated[i] = match mutated[i] {
                b'0'..=b'8' => mutated[i] + 1,
                b'9' => b'0',
                b'a'..=b'y' => mutated[i] + 1,
                b'z' => b'a',
                b':' | b',' | b'{' | b'}' => b';',
                b'"' => b'\'',
                b'_' => b'-',
                // Checked below
                b' ' | b'\n' => continue,
                other => panic!("unexpected byte {:?} in values", other as char),
            };
            fs::write(&record.path, &mutated).unwrap();
            let err = store.load(&record).unwrap_err();
            assert!(err.is_corrupt(), "byte {} not detected: {}", i, err);
        }
    }

    #[test]
    fn test_whitespace_edits_still_load() {
        let (store, _temp) = create_test_store();
        let snapshot = snapshot_at(0);
        let record = store.save(&snapshot).unwrap();

        let original = fs::read_to_string(&record.path).unwrap();
        let reindented = original.replace("  ", "\t");
        assert_ne!(original, reindented);
        fs::write(&record.path, reindented).unwrap();

        assert_eq!(store.load(&record).unwrap(), snapshot);
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let (store, _temp) = create_test_store();
        let record = store.save(&snapshot_at(0)).unwrap();
        fs::write(&record.path, "{ not json").unwrap();

        assert!(store.load(&record).unwrap_err().is_corrupt());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (store, _temp) = create_test_store();
        let record = store.save(&snapshot_at(0)).unwrap();
        fs::remove_file(&record.path).unwrap();

        assert!(store.load(&record).unwrap_err().is_not_found());
    }

    #[test]
    fn test_unwritable_dir_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        let store = BackupStore::new(blocker.join("backups"));
        let err = store.save(&snapshot_at(0)).unwrap_err();
        assert!(matches!(err, MouseError::Write { .. }), "unexpected: {}", err);
    }

    #[test]
    fn test_foreign_files_ignored() {
        let (store, _temp) = create_test_store();
        store.save(&snapshot_at(0)).unwrap();
        fs::write(store.dir().join("notes.txt"), "hello").unwrap();
        fs::write(store.dir().join("backup_garbage.json"), "{}").unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_or_missing_dir() {
        let (store, _temp) = create_test_store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn test_find_by_name() {
        let (store, _temp) = create_test_store();
        let record = store.save(&snapshot_at(0)).unwrap();

        assert_eq!(store.find(&record.filename).unwrap(), Some(record));
        assert_eq!(store.find("backup_19990101_000000.json").unwrap(), None);
    }

    #[test]
    fn test_prune_keeps_newest() {
        let (store, _temp) = create_test_store();
        for i in 0..5 {
            store.save(&snapshot_at(i)).unwrap();
        }
        let before = store.list().unwrap();

        let report = store
            .prune_at(&RetentionPolicy::keep_newest(2), base_time())
            .unwrap();
        assert_eq!(report.removed.len(), 3);
        assert_eq!(report.removed[0], before[4].path);

        let remaining = store.list().unwrap();
        assert_eq!(remaining, before[..2].to_vec());
    }

    #[test]
    fn test_prune_compresses_and_loads() {
        let (store, _temp) = create_test_store();
        store.save(&snapshot_at(-3 * 24 * 60)).unwrap();
        store.save(&snapshot_at(0)).unwrap();

        let policy = RetentionPolicy {
            keep_latest: 1,
            max_count: None,
            max_age_days: None,
            compress_after_days: Some(1),
        };
        let report = store.prune_at(&policy, base_time()).unwrap();
        assert_eq!(report.compressed.len(), 1);
        assert!(report.removed.is_empty());

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(!listed[0].compressed);
        assert!(listed[1].compressed);
        assert!(listed[1].filename.ends_with(".json.gz"));

        let loaded = store.load(&listed[1]).unwrap();
        assert_eq!(loaded.values(), &scenario_values());

        // A second run has nothing left to do
        assert!(store.prune_at(&policy, base_time()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_file_name() {
        assert_eq!(
            parse_file_name("backup_20250110_093000.json"),
            Some(("20250110_093000".to_string(), 0, false))
        );
        assert_eq!(
            parse_file_name("backup_20250110_093000_12.json.gz"),
            Some(("20250110_093000".to_string(), 12, true))
        );
        assert_eq!(parse_file_name("backup_20250110_093000x.json"), None);
        assert_eq!(parse_file_name("backup_2025.json"), None);
        assert_eq!(parse_file_name("snapshot_20250110_093000.json"), None);
    }
}
