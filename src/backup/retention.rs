//! Backup retention policy
//!
//! Decides which backups to delete or compress. Planning is pure; the store
//! carries out the plan.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::store::BackupRecord;

/// Rules governing how many and how old backups are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Newest records that are never deleted or compressed, whatever their age
    #[serde(default = "default_keep_latest")]
    pub keep_latest: usize,

    /// Delete records beyond this many, newest first
    #[serde(default = "default_max_count")]
    pub max_count: Option<usize>,

    /// Delete records older than this many days
    #[serde(default = "default_max_age_days")]
    pub max_age_days: Option<u32>,

    /// Gzip records older than this many days that are otherwise kept
    #[serde(default)]
    pub compress_after_days: Option<u32>,
}

fn default_keep_latest() -> usize {
    1
}

fn default_max_count() -> Option<usize> {
    Some(30)
}

fn default_max_age_days() -> Option<u32> {
    Some(180)
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep_latest: default_keep_latest(),
            max_count: default_max_count(),
            max_age_days: default_max_age_days(),
            compress_after_days: None,
        }
    }
}

impl RetentionPolicy {
    /// Keep exactly the `count` newest records
    pub fn keep_newest(count: usize) -> Self {
        Self {
            keep_latest: count.max(1),
            max_count: Some(count.max(1)),
            max_age_days: None,
            compress_after_days: None,
        }
    }

    /// Split `records` (newest first) into deletions and compressions
    ///
    /// Both lists are ordered oldest first.
    pub fn plan<'a>(&self, records: &'a [BackupRecord], now: DateTime<Utc>) -> PrunePlan<'a> {
        let keep_latest = self.keep_latest.max(1);
        let max_age = self.max_age_days.map(|d| Duration::days(i64::from(d)));
        let compress_age = self.compress_after_days.map(|d| Duration::days(i64::from(d)));

        let mut plan = PrunePlan::default();

        for (index, record) in records.iter().enumerate().rev() {
            if index < keep_latest {
                continue;
            }

            let age = now.signed_duration_since(record.created_at);
            let over_count = self.max_count.map_or(false, |max| index >= max);
            let over_age = max_age.map_or(false, |max| age > max);

            if over_count || over_age {
                plan.delete.push(record);
            } else if !record.compressed && compress_age.map_or(false, |limit| age > limit) {
                plan.compress.push(record);
            }
        }

        plan
    }
}

/// Records selected by a retention policy
#[derive(Debug, Default)]
pub struct PrunePlan<'a> {
    pub delete: Vec<&'a BackupRecord>,
    pub compress: Vec<&'a BackupRecord>,
}

impl PrunePlan<'_> {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.compress.is_empty()
    }
}
