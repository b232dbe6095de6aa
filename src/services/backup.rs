//! Backup service
//!
//! Creating, finding, verifying, pruning and restoring backups.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use super::Services;
use crate::backup::{
    BackupKind, BackupRecord, PruneReport, RestoreOutcome, SettingsSnapshot,
};
use crate::error::{MouseError, MouseResult};

/// Keyword accepted wherever a backup is named
pub const LATEST: &str = "latest";

/// Result of checking one backup
#[derive(Debug)]
pub struct VerifyResult {
    pub record: BackupRecord,
    pub error: Option<MouseError>,
}

impl VerifyResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Service for backup management
pub struct BackupService<'a> {
    services: &'a Services,
}

impl<'a> BackupService<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }

    /// Snapshot the live settings, then apply retention
    pub fn create(&self, kind: BackupKind) -> MouseResult<BackupRecord> {
        let current = self.services.system().get_current()?;
        let snapshot = SettingsSnapshot::capture_at(current, Utc::now(), kind)?;
        let record = self.services.store().save(&snapshot)?;

        if let Err(e) = self.services.store().prune(&self.services.settings().retention) {
            warn!(error = %e, "Retention policy could not be applied");
        }

        Ok(record)
    }

    /// All backups, newest first
    pub fn list(&self) -> MouseResult<Vec<BackupRecord>> {
        self.services.store().list()
    }

    /// Find a backup by `latest`, file name, or path
    pub fn resolve(&self, identifier: &str) -> MouseResult<BackupRecord> {
        let store = self.services.store();
        let identifier = identifier.trim();

        if identifier.eq_ignore_ascii_case(LATEST) {
            return store
                .latest()?
                .ok_or_else(|| MouseError::backup_not_found("no backups yet"));
        }

        if let Some(record) = store.find(identifier)? {
            return Ok(record);
        }

        let path = Path::new(identifier);
        if path.exists() {
            return store.record_at(path).ok_or_else(|| {
                MouseError::Validation(format!(
                    "{} is not a backup file (expected backup_<timestamp>.json)",
                    identifier
                ))
            });
        }

        Err(MouseError::backup_not_found(identifier))
    }

    /// Read and verify a backup
    pub fn load(&self, record: &BackupRecord) -> MouseResult<SettingsSnapshot> {
        self.services.store().load(record)
    }

    /// Check every backup's integrity
    pub fn verify_all(&self) -> MouseResult<Vec<VerifyResult>> {
        let results: Vec<VerifyResult> = self
            .list()?
            .into_iter()
            .map(|record| {
                let error = self.load(&record).err();
                VerifyResult { record, error }
            })
            .collect();

        let bad = results.iter().filter(|r| !r.is_ok()).count();
        info!(checked = results.len(), corrupt = bad, "Backups verified");
        Ok(results)
    }

    /// Backups the retention policy would delete and compress
    pub fn prune_preview(&self) -> MouseResult<(Vec<BackupRecord>, Vec<BackupRecord>)> {
        let records = self.list()?;
        let plan = self
            .services
            .settings()
            .retention
            .plan(&records, Utc::now());

        Ok((
            plan.delete.into_iter().cloned().collect(),
            plan.compress.into_iter().cloned().collect(),
        ))
    }

    /// Apply the retention policy
    pub fn prune(&self) -> MouseResult<PruneReport> {
        self.services
            .store()
            .prune(&self.services.settings().retention)
    }

    /// Restore a backup to the live system
    pub fn restore(&self, record: &BackupRecord) -> MouseResult<RestoreOutcome> {
        self.services.engine().restore(record)
    }
}
