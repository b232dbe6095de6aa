//! End-to-end tests for the `mousemgr` binary
//!
//! Each test gets its own home directory through `MOUSE_MANAGER_HOME`. Off
//! Windows the binary uses the simulated settings backend, which starts from
//! the Windows defaults in every process.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mousemgr(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mousemgr").unwrap();
    cmd.env("MOUSE_MANAGER_HOME", home)
        .env_remove("MOUSE_MANAGER_LOG");
    cmd
}

/// Run once so later assertions don't see the welcome text
fn initialized() -> TempDir {
    let home = TempDir::new().unwrap();
    mousemgr(home.path()).arg("config").assert().success();
    home
}

fn backup_files(home: &Path) -> Vec<String> {
    let dir = home.join("backups");
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("backup_"))
        .collect();
    names.sort();
    names
}

#[test]
fn welcome_is_shown_once() {
    let home = TempDir::new().unwrap();

    mousemgr(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Mouse Manager"));

    mousemgr(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Mouse Manager").not());
}

#[test]
fn config_shows_paths() {
    let home = initialized();

    mousemgr(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup directory"))
        .stdout(predicate::str::contains("Retention"))
        .stdout(predicate::str::contains("Administrator:    ok"))
        .stdout(predicate::str::contains("Drag area:        4x4px"));
}

#[test]
fn no_command_prints_hints() {
    let home = initialized();

    mousemgr(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mousemgr --help"));
}

#[test]
fn backup_create_then_list_and_info() {
    let home = initialized();

    mousemgr(home.path())
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: backup_"));

    let files = backup_files(home.path());
    assert_eq!(files.len(), 1);

    mousemgr(home.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(files[0].as_str()))
        .stdout(predicate::str::contains("1 backup(s)"));

    mousemgr(home.path())
        .args(["backup", "info", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pointer_speed"))
        .stdout(predicate::str::contains("(valid)"));
}

#[test]
fn backup_verify_detects_tampering() {
    let home = initialized();
    mousemgr(home.path()).args(["backup", "create"]).assert().success();

    mousemgr(home.path())
        .args(["backup", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));

    let path = home.path().join("backups").join(&backup_files(home.path())[0]);
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.replace("\"pointer_speed\": 10", "\"pointer_speed\": 11")).unwrap();

    mousemgr(home.path())
        .args(["backup", "verify"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("CORRUPT"));
}

#[test]
fn restore_needs_force() {
    let home = initialized();
    mousemgr(home.path()).args(["backup", "create"]).assert().success();

    mousemgr(home.path())
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(backup_files(home.path()).len(), 1);

    mousemgr(home.path())
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore complete!"))
        .stdout(predicate::str::contains("Pre-restore backup saved"));
    assert_eq!(backup_files(home.path()).len(), 2);
}

#[test]
fn restore_unknown_backup_fails() {
    let home = initialized();

    mousemgr(home.path())
        .args(["backup", "restore", "backup_20000101_000000.json", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn settings_show_and_set() {
    let home = initialized();

    mousemgr(home.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pointer speed"))
        .stdout(predicate::str::contains("10/20"))
        .stdout(predicate::str::contains("Drag area"));

    mousemgr(home.path())
        .args(["settings", "set", "speed", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pointer_speed = 12"))
        .stdout(predicate::str::contains("Previous settings saved to backup_"));
    assert_eq!(backup_files(home.path()).len(), 1);
}

#[test]
fn settings_set_out_of_range_fails() {
    let home = initialized();

    mousemgr(home.path())
        .args(["settings", "set", "speed", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 20"));
    assert!(backup_files(home.path()).is_empty());
}

#[test]
fn settings_keys_lists_everything() {
    let home = initialized();

    mousemgr(home.path())
        .args(["settings", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("double_click_time"))
        .stdout(predicate::str::contains("wheel_scroll_lines"));
}

#[cfg(not(windows))]
#[test]
fn devices_reports_none_without_hid() {
    let home = initialized();

    mousemgr(home.path())
        .arg("devices")
        .assert()
        .success()
        .stdout(predicate::str::contains("No mice detected."));
}

#[test]
fn logs_show_recorded_actions() {
    let home = initialized();
    mousemgr(home.path()).args(["backup", "create"]).assert().success();

    mousemgr(home.path())
        .args(["logs", "-n", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup"));
}
