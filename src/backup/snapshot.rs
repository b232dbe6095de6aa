//! Settings snapshots
//!
//! A snapshot is an immutable, checksummed record of mouse settings at a
//! point in time. The checksum covers only the compact JSON serialization of
//! `values`, so any change to a stored value is detected before restore.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{MouseError, MouseResult};
use crate::models::SettingsValues;

/// `strftime` format of snapshot timestamps; sorts lexically by time
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Why a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackupKind {
    /// Requested by the user
    #[default]
    Manual,
    /// Safety net taken just before a restore
    PreRestore,
    /// Taken automatically before a settings change
    PreChange,
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::PreRestore => write!(f, "pre-restore"),
            Self::PreChange => write!(f, "pre-change"),
        }
    }
}

/// An immutable record of mouse settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    kind: BackupKind,
    timestamp: String,
    values: SettingsValues,
    checksum: String,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SettingsSnapshot {
    /// Capture `values` stamped with the current time
    pub fn capture(values: SettingsValues) -> MouseResult<Self> {
        Self::capture_at(values, Utc::now(), BackupKind::Manual)
    }

    /// Capture `values` stamped with `at`
    pub fn capture_at(
        values: SettingsValues,
        at: DateTime<Utc>,
        kind: BackupKind,
    ) -> MouseResult<Self> {
        let checksum = compute_checksum(&values)?;
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            kind,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            values,
            checksum,
        })
    }

    /// Same snapshot with a different origin
    pub fn with_kind(mut self, kind: BackupKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn values(&self) -> &SettingsValues {
        &self.values
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn kind(&self) -> BackupKind {
        self.kind
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// The capture instant, if the timestamp is well formed
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Recompute the checksum and compare; a checksum that cannot be
    /// computed never matches
    pub fn is_valid(&self) -> bool {
        matches!(
            compute_checksum(&self.values),
            Ok(computed) if computed.eq_ignore_ascii_case(&self.checksum)
        )
    }

    /// Like `is_valid`, but returns the mismatch as an error naming `source`
    pub fn verify(&self, source: impl Into<std::path::PathBuf>) -> MouseResult<()> {
        let computed = compute_checksum(&self.values)?;
        if computed.eq_ignore_ascii_case(&self.checksum) {
            Ok(())
        } else {
            Err(MouseError::corrupt(
                source,
                format!(
                    "checksum mismatch (stored {}, computed {})",
                    self.checksum, computed
                ),
            ))
        }
    }
}

/// Hex SHA-256 over the compact JSON form of `values`
pub fn compute_checksum(values: &SettingsValues) -> MouseResult<String> {
    let bytes = serde_json::to_vec(values)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Parse a `YYYYMMDD_HHMMSS` timestamp as UTC
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}
