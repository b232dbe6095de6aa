//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;

use crate::backup::{is_untouched, BackupKind};
use crate::display::{
    format_applied, format_backup_details, format_backup_list, format_keys,
    format_verify_results,
};
use crate::error::{MouseError, MouseResult};
use crate::services::Services;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up the current mouse settings
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a specific backup
    Info {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,
    },

    /// Check backup integrity (all backups if none is named)
    Verify {
        /// Backup filename or path (use 'latest' for most recent)
        backup: Option<String>,
    },

    /// Restore mouse settings from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete or compress old backups according to the retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(services: &Services, cmd: BackupCommands) -> MouseResult<()> {
    let backups = services.backups();

    match cmd {
        BackupCommands::Create => {
            println!("Creating backup...");
            let record = backups.create(BackupKind::Manual)?;
            println!("Backup created: {}", record.filename);
            println!("Location: {}", record.path.display());
        }

        BackupCommands::List { verbose } => {
            let records = backups.list()?;
            print!("{}", format_backup_list(&records, verbose));
            if records.is_empty() {
                println!();
                println!("Create one with: mousemgr backup create");
            }
        }

        BackupCommands::Info { backup } => {
            let record = backups.resolve(&backup)?;
            let snapshot = backups.load(&record)?;
            print!("{}", format_backup_details(&record, &snapshot));
        }

        BackupCommands::Verify { backup: Some(backup) } => {
            let record = backups.resolve(&backup)?;
            let snapshot = backups.load(&record)?;
            println!(
                "OK: {} ({} settings, checksum {})",
                record.filename,
                snapshot.values().len(),
                snapshot.checksum()
            );
        }

        BackupCommands::Verify { backup: None } => {
            let results = backups.verify_all()?;
            print!("{}", format_verify_results(&results));
            let bad = results.iter().filter(|r| !r.is_ok()).count();
            if bad > 0 {
                return Err(MouseError::Validation(format!("{} corrupt backup(s)", bad)));
            }
        }

        BackupCommands::Restore { backup, force } => {
            let record = backups.resolve(&backup)?;
            let snapshot = backups.load(&record)?;

            print!("{}", format_backup_details(&record, &snapshot));
            println!();

            if !force {
                println!("WARNING: This will change your current mouse settings!");
                println!("A backup of the current settings is taken first.");
                println!("To proceed, run again with --force flag:");
                println!("  mousemgr backup restore {} --force", backup);
                return Ok(());
            }

            println!("Restoring from backup...");
            match backups.restore(&record) {
                Ok(outcome) => {
                    if let Some(safety) = &outcome.safety_backup {
                        println!("Pre-restore backup saved: {}", safety.filename);
                    } else {
                        println!("Warning: pre-restore backup could not be saved");
                    }
                    println!("Restore complete!");
                    println!("{}", outcome.summary());
                }
                Err(e) => {
                    if let Some(partial) = e.as_partial_restore() {
                        println!("Restore stopped at '{}'.", partial.failed);
                        if !partial.applied.is_empty() {
                            println!("Applied:");
                            println!("{}", format_applied(&partial.applied));
                        }
                        println!("Not applied: {}", format_keys(&partial.not_applied));
                    }
                    if is_untouched(&e) {
                        println!("No settings were changed.");
                    }
                    return Err(e);
                }
            }
        }

        BackupCommands::Prune { force } => {
            let retention = &services.settings().retention;
            let (delete, compress) = backups.prune_preview()?;

            if delete.is_empty() && compress.is_empty() {
                println!("No backups to prune.");
                println!(
                    "Current retention policy: keep {} newest, at most {}, up to {}",
                    retention.keep_latest,
                    retention
                        .max_count
                        .map_or("unlimited".to_string(), |n| format!("{} backups", n)),
                    retention
                        .max_age_days
                        .map_or("any age".to_string(), |d| format!("{} days old", d)),
                );
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            for record in &delete {
                println!("  delete    {}", record.filename);
            }
            for record in &compress {
                println!("  compress  {}", record.filename);
            }
            println!();

            if !force {
                println!("To prune old backups, run again with --force flag:");
                println!("  mousemgr backup prune --force");
                return Ok(());
            }

            let report = backups.prune()?;
            println!(
                "Deleted {} backup(s), compressed {}.",
                report.removed.len(),
                report.compressed.len()
            );
        }
    }

    Ok(())
}
