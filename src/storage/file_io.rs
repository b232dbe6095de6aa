//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::MouseError;

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, MouseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(MouseError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| MouseError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| MouseError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write bytes to a fresh temp file in `dir`, synced to disk
///
/// The temp file lives in the destination directory so the final rename
/// stays on one filesystem.
pub fn write_temp_in(dir: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let mut temp = tempfile::Builder::new()
        .prefix(".tmp-")
        .suffix(".partial")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    Ok(temp)
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), MouseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent).map_err(|e| {
        MouseError::Io(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    let json = serde_json::to_vec_pretty(data)
        .map_err(|e| MouseError::Json(format!("Failed to serialize data: {}", e)))?;

    let temp = write_temp_in(parent, &json)
        .map_err(|e| MouseError::Io(format!("Failed to write temp file: {}", e)))?;

    temp.persist(path)
        .map_err(|e| MouseError::Io(format!("Failed to rename temp file: {}", e.error)))?;

    Ok(())
}
