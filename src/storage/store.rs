//! Book store over a single CSV file
//!
//! The store holds only the file location. Every operation reads or
//! rewrites the file in full, so what is on disk is always the state.
//! Uniqueness of ISBNs is the caller's responsibility: `add` appends
//! unconditionally.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::{StorageError, StorageResult};
use super::reader::{read_books, read_bytes};
use super::record::encode_books;
use super::writer::{append, replace};
use crate::catalog::{Book, BookFilter};

/// Flat-file book store keyed by ISBN
#[derive(Debug)]
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    /// Opens or creates the store file at `path`.
    ///
    /// Creates missing parent directories. A missing or empty file is
    /// initialized with the header row. An existing file is parsed once
    /// so that a malformed store fails here instead of on first request.
    ///
    /// # Errors
    ///
    /// `StorageError::Io` if the file cannot be created or read,
    /// `StorageError::Parse` if an existing line is malformed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::io_error(
                        format!("Failed to create directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let is_empty = match fs::metadata(&path) {
            Ok(m) => m.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                return Err(StorageError::io_error(
                    format!("Failed to read metadata: {}", path.display()),
                    e,
                ))
            }
        };

        if is_empty {
            let header = encode_books(std::iter::empty(), true)?;
            replace(&path, &header)?;
            info!(path = %path.display(), "Created book store");
        } else {
            let books = read_books(&path)?;
            info!(path = %path.display(), records = books.len(), "Opened book store");
        }

        Ok(Self { path })
    }

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records matching `filter`, in file order.
    pub fn list(&self, filter: &BookFilter) -> StorageResult<Vec<Book>> {
        let mut books = read_books(&self.path)?;
        books.retain(|book| filter.matches(book));
        Ok(books)
    }

    /// Appends a record and fsyncs. Does not check for duplicates.
    pub fn add(&mut self, book: &Book) -> StorageResult<()> {
        let row = encode_books(std::iter::once(book), false)?;
        append(&self.path, &row)?;
        debug!(isbn = %book.isbn, "Appended record");
        Ok(())
    }

    /// Drops every record whose ISBN equals `isbn` exactly.
    ///
    /// Returns whether anything was removed. The file is only rewritten
    /// when a record matched.
    pub fn remove(&mut self, isbn: &str) -> StorageResult<bool> {
        let books = read_books(&self.path)?;
        let before = books.len();
        let remaining: Vec<Book> = books.into_iter().filter(|b| b.isbn != isbn).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.rewrite(&remaining)?;
        debug!(isbn, removed = before - remaining.len(), "Removed records");
        Ok(true)
    }

    /// Replaces the record for `old_isbn` with `book`, which moves to the
    /// end of the file.
    ///
    /// Same outcome as `remove(old_isbn)` followed by `add(book)`, written
    /// in one replacement. Returns false and leaves the file untouched when
    /// `old_isbn` is absent.
    pub fn update(&mut self, old_isbn: &str, book: &Book) -> StorageResult<bool> {
        let books = read_books(&self.path)?;
        let before = books.len();
        let mut remaining: Vec<Book> = books.into_iter().filter(|b| b.isbn != old_isbn).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        remaining.push(book.clone());
        self.rewrite(&remaining)?;
        debug!(old_isbn, isbn = %book.isbn, "Updated record");
        Ok(true)
    }

    /// Number of stored records, header excluded.
    pub fn count(&self) -> StorageResult<usize> {
        Ok(read_books(&self.path)?.len())
    }

    /// Whether a record with exactly this ISBN is stored.
    pub fn exists(&self, isbn: &str) -> StorageResult<bool> {
        Ok(read_books(&self.path)?.iter().any(|b| b.isbn == isbn))
    }

    /// Raw bytes of the store file.
    pub fn contents(&self) -> StorageResult<Vec<u8>> {
        read_bytes(&self.path)
    }

    fn rewrite(&self, books: &[Book]) -> StorageResult<()> {
        let bytes = encode_books(books, true)?;
        replace(&self.path, &bytes)
    }
}
