//! Store file writes with fsync enforcement
//!
//! Two primitives:
//! - `append`: add bytes at the end of the file, then fsync
//! - `replace`: write a sibling temp file, fsync it, rename it over the
//!   store file, then fsync the directory
//!
//! A failed `replace` leaves the previous file untouched and deletes the
//! partial temp file.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};

/// Append `bytes` to the store file, creating it if needed.
///
/// If the existing content does not end with a newline one is inserted
/// first so the new row never merges into the previous one.
pub fn append(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            StorageError::io_error(format!("Failed to open store file: {}", path.display()), e)
        })?;

    if !ends_with_newline(&mut file)? {
        file.write_all(b"\n")
            .map_err(|e| StorageError::io_error("Failed to write line terminator", e))?;
    }

    file.write_all(bytes)
        .map_err(|e| StorageError::io_error("Failed to append record", e))?;

    // fsync - mandatory for durability
    file.sync_all()
        .map_err(|e| StorageError::io_error("fsync failed after append", e))?;

    Ok(())
}

/// Returns true for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> StorageResult<bool> {
    let len = file
        .metadata()
        .map_err(|e| StorageError::io_error("Failed to read file metadata", e))?
        .len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))
        .and_then(|_| file.read_exact(&mut last))
        .map_err(|e| StorageError::io_error("Failed to inspect end of store file", e))?;

    Ok(last[0] == b'\n')
}

/// Replace the whole store file with `bytes`.
pub fn replace(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let temp_path = temp_path_for(path);

    if let Err(e) = write_synced(&temp_path, bytes) {
        cleanup_partial(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        cleanup_partial(&temp_path);
        StorageError::io_error(
            format!("Failed to replace store file: {}", path.display()),
            e,
        )
    })?;

    sync_parent_dir(path)
}

fn write_synced(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let mut file = File::create(path).map_err(|e| {
        StorageError::io_error(format!("Failed to create temp file: {}", path.display()), e)
    })?;

    file.write_all(bytes)
        .map_err(|e| StorageError::io_error("Failed to write temp file", e))?;

    file.sync_all()
        .map_err(|e| StorageError::io_error("fsync failed on temp file", e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn cleanup_partial(path: &Path) {
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> StorageResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let dir = File::open(parent).map_err(|e| {
        StorageError::io_error(format!("Failed to open directory: {}", parent.display()), e)
    })?;

    dir.sync_all().map_err(|e| {
        StorageError::io_error(format!("Failed to fsync directory: {}", parent.display()), e)
    })
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> StorageResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.csv");

        append(&path, b"a\n").unwrap();
        append(&path, b"b\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_append_repairs_missing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.csv");
        fs::write(&path, "first").unwrap();

        append(&path, b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_replace_overwrites_and_leaves_no_temp() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.csv");
        fs::write(&path, "old content\n").unwrap();

        replace(&path, b"new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/db.csv");
        assert_eq!(temp_path_for(path), PathBuf::from("/data/db.csv.tmp"));
    }
}
