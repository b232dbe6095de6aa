//! Restore engine for Mouse Manager
//!
//! Loads a stored snapshot and applies it to the live system one setting at a
//! time. Every multi-setting write goes through the same guard, so two
//! restores (or a restore and a preset change) never interleave.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use super::snapshot::{BackupKind, SettingsSnapshot};
use super::store::{BackupRecord, BackupStore};
use crate::error::{MouseError, MouseResult, PartialRestore};
use crate::models::{SettingKey, SettingsValues};
use crate::system::SystemSettings;

/// Where the engine is in its current (or last) run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreState {
    #[default]
    Idle,
    Loading,
    SafetyBackup,
    Applying,
    Completed,
    PartialFailure,
    Aborted,
}

impl RestoreState {
    /// Whether the run has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::PartialFailure | Self::Aborted)
    }
}

impl fmt::Display for RestoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::SafetyBackup => "safety backup",
            Self::Applying => "applying",
            Self::Completed => "completed",
            Self::PartialFailure => "partial failure",
            Self::Aborted => "aborted",
        };
        write!(f, "{}", label)
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    /// The backup that was restored, if this run came from one
    pub source: Option<BackupRecord>,
    /// Everything that reached the system
    pub applied: SettingsValues,
    /// The safety snapshot taken first, if it could be saved
    pub safety_backup: Option<BackupRecord>,
}

impl RestoreOutcome {
    pub fn summary(&self) -> String {
        let keys: Vec<&str> = self.applied.keys().map(|k| k.as_str()).collect();
        format!("Applied {} setting(s): {}", keys.len(), keys.join(", "))
    }
}

/// Applies snapshots to the live system
pub struct RestoreEngine {
    store: Arc<BackupStore>,
    system: Arc<dyn SystemSettings>,
    gate: Mutex<()>,
    state: Mutex<RestoreState>,
}

impl RestoreEngine {
    pub fn new(store: Arc<BackupStore>, system: Arc<dyn SystemSettings>) -> Self {
        Self {
            store,
            system,
            gate: Mutex::new(()),
            state: Mutex::new(RestoreState::Idle),
        }
    }

    /// Current state
    pub fn state(&self) -> RestoreState {
        *self.state.lock()
    }

    pub fn store(&self) -> &Arc<BackupStore> {
        &self.store
    }

    pub fn system(&self) -> &Arc<dyn SystemSettings> {
        &self.system
    }

    /// Restore a backup
    ///
    /// A pre-restore safety snapshot is saved first; if that fails the
    /// restore still goes ahead.
    pub fn restore(&self, record: &BackupRecord) -> MouseResult<RestoreOutcome> {
        let _guard = self.gate.lock();

        self.set_state(RestoreState::Loading);
        let snapshot = match self.store.load(record) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.set_state(RestoreState::Aborted);
                error!(backup = %record.filename, error = %e, "Restore aborted");
                return Err(e);
            }
        };

        info!(
            backup = %record.filename,
            settings = snapshot.values().len(),
            "Restoring backup"
        );

        let mut outcome = self.run(snapshot.values(), Some(BackupKind::PreRestore))?;
        outcome.source = Some(record.clone());
        Ok(outcome)
    }

    /// Apply `values` under the same guard as `restore`
    ///
    /// When `safety` is set a snapshot of that kind is saved before anything
    /// is written.
    pub fn apply_values(
        &self,
        values: &SettingsValues,
        safety: Option<BackupKind>,
    ) -> MouseResult<RestoreOutcome> {
        let _guard = self.gate.lock();
        self.run(values, safety)
    }

    /// Safety backup then apply; caller holds the gate
    fn run(
        &self,
        values: &SettingsValues,
        safety: Option<BackupKind>,
    ) -> MouseResult<RestoreOutcome> {
        let safety_backup = match safety {
            Some(kind) => {
                self.set_state(RestoreState::SafetyBackup);
                self.save_safety_backup(kind)
            }
            None => None,
        };

        self.set_state(RestoreState::Applying);
        let mut applied = SettingsValues::new();

        for (index, (key, value)) in values.iter().enumerate() {
            if let Err(e) = self.system.apply(*key, value) {
                let not_applied: Vec<SettingKey> = values.keys().skip(index).collect();
                let partial = PartialRestore {
                    applied,
                    failed: *key,
                    reason: e.to_string(),
                    not_applied,
                    permission_denied: e.is_permission(),
                };

                self.set_state(RestoreState::PartialFailure);
                error!(
                    key = %key,
                    applied = partial.applied.len(),
                    not_applied = partial.not_applied.len(),
                    permission_denied = partial.permission_denied,
                    error = %e,
                    "Restore stopped partway"
                );
                return Err(partial.into());
            }
            applied.insert(*key, value.clone());
        }

        self.set_state(RestoreState::Completed);
        info!(applied = applied.len(), "Settings applied");

        Ok(RestoreOutcome {
            source: None,
            applied,
            safety_backup,
        })
    }

    fn save_safety_backup(&self, kind: BackupKind) -> Option<BackupRecord> {
        let result = self
            .system
            .get_current()
            .and_then(|current| SettingsSnapshot::capture_at(current, Utc::now(), kind))
            .and_then(|snapshot| self.store.save(&snapshot));

        match result {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(kind = %kind, error = %e, "Safety backup failed, continuing");
                None
            }
        }
    }

    fn set_state(&self, state: RestoreState) {
        *self.state.lock() = state;
    }
}

/// Shorthand for errors that leave the system untouched
pub fn is_untouched(err: &MouseError) -> bool {
    match err {
        MouseError::CorruptSnapshot { .. } | MouseError::NotFound { .. } => true,
        MouseError::PartialRestore(partial) => partial.nothing_applied(),
        _ => false,
    }
}
