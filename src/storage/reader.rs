//! Whole-file reads of the store
//!
//! Each call opens its own handle and drops it before returning. A missing
//! file reads as an empty store.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::record::decode_books;
use crate::catalog::Book;

/// Read and decode every book in the store file, in file order.
pub fn read_books(path: &Path) -> StorageResult<Vec<Book>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StorageError::io_error(
                format!("Failed to open store file: {}", path.display()),
                e,
            ))
        }
    };

    decode_books(BufReader::new(file))
}

/// Read the raw bytes of the store file.
pub fn read_bytes(path: &Path) -> StorageResult<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(StorageError::io_error(
            format!("Failed to read store file: {}", path.display()),
            e,
        )),
    }
}
