//! Zip packaging of the store file for download
//!
//! The archive is built in memory and holds exactly one deflated entry.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::errors::{StorageError, StorageResult};

/// Build a zip archive containing `data` under `entry_name`.
pub fn zip_entry(entry_name: &str, data: &[u8]) -> StorageResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(entry_name, options).map_err(|e| {
        StorageError::Archive(format!("Failed to start entry {}: {}", entry_name, e))
    })?;

    zip.write_all(data)
        .map_err(|e| StorageError::io_error("Failed to write archive entry", e))?;

    let cursor = zip
        .finish()
        .map_err(|e| StorageError::Archive(format!("Failed to finish archive: {}", e)))?;

    Ok(cursor.into_inner())
}
