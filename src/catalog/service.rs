//! Catalog service
//!
//! Business rules on top of the record store: input validation, ISBN
//! uniqueness and NotFound/Conflict classification. One store instance sits
//! behind a mutex, so every check-then-act sequence below is atomic within
//! the process.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::book::Book;
use super::errors::{CatalogError, CatalogResult};
use super::filter::BookFilter;
use crate::storage::{content_hash, zip_entry, BookStore};

/// A zipped copy of the store file
#[derive(Debug, Clone)]
pub struct StoreArchive {
    /// Suggested download name, e.g. `db.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Catalog operations over a single store
pub struct CatalogService {
    store: Mutex<BookStore>,
    path: PathBuf,
}

impl CatalogService {
    /// Wrap an opened store
    pub fn new(store: BookStore) -> Self {
        let path = store.path().to_path_buf();
        Self {
            store: Mutex::new(store),
            path,
        }
    }

    /// Open the store at `path` and wrap it
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        Ok(Self::new(BookStore::open(path)?))
    }

    /// Location of the backing store file
    pub fn store_path(&self) -> &Path {
        &self.path
    }

    fn store(&self) -> CatalogResult<MutexGuard<'_, BookStore>> {
        self.store
            .lock()
            .map_err(|_| CatalogError::LockPoisoned("Lock poisoned".into()))
    }

    /// Books matching `filter`, in store order
    pub fn list(&self, filter: &BookFilter) -> CatalogResult<Vec<Book>> {
        filter.validate()?;
        Ok(self.store()?.list(filter)?)
    }

    /// Add a new book. Fails with `Conflict` if the ISBN is taken.
    pub fn create(&self, book: &Book) -> CatalogResult<()> {
        book.validate()?;

        let mut store = self.store()?;
        if store.exists(&book.isbn)? {
            return Err(CatalogError::Conflict(book.isbn.clone()));
        }
        store.add(book)?;
        Ok(())
    }

    /// Remove the book with this exact ISBN
    pub fn delete(&self, isbn: &str) -> CatalogResult<()> {
        require_isbn(isbn)?;

        if !self.store()?.remove(isbn)? {
            return Err(CatalogError::NotFound(isbn.to_string()));
        }
        Ok(())
    }

    /// Replace the book stored under `old_isbn` with `book`.
    ///
    /// A new ISBN that belongs to a different stored book is a `Conflict`;
    /// keeping the same ISBN is always allowed.
    pub fn update(&self, old_isbn: &str, book: &Book) -> CatalogResult<()> {
        require_isbn(old_isbn)?;
        book.validate()?;

        let mut store = self.store()?;
        if !store.exists(old_isbn)? {
            return Err(CatalogError::NotFound(old_isbn.to_string()));
        }
        if book.isbn != old_isbn && store.exists(&book.isbn)? {
            return Err(CatalogError::Conflict(book.isbn.clone()));
        }
        if !store.update(old_isbn, book)? {
            return Err(CatalogError::NotFound(old_isbn.to_string()));
        }
        Ok(())
    }

    /// Number of stored books
    pub fn count(&self) -> CatalogResult<usize> {
        Ok(self.store()?.count()?)
    }

    /// SHA-256 of the store file
    pub fn hash(&self) -> CatalogResult<String> {
        let bytes = self.store()?.contents()?;
        Ok(content_hash(&bytes))
    }

    /// Zip the store file under its own file name
    pub fn archive(&self) -> CatalogResult<StoreArchive> {
        let bytes = self.store()?.contents()?;

        let entry_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "db.csv".to_string());
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "db".to_string());

        Ok(StoreArchive {
            file_name: format!("{}.zip", stem),
            bytes: zip_entry(&entry_name, &bytes)?,
        })
    }

    /// Add every book whose ISBN is not stored yet. Duplicates, including
    /// repeats within `books`, are skipped.
    ///
    /// Every book is validated before anything is written; one invalid
    /// record rejects the whole batch.
    pub fn import(&self, books: &[Book]) -> CatalogResult<ImportReport> {
        for book in books {
            book.validate()?;
        }

        let mut report = ImportReport::default();
        let mut store = self.store()?;

        for book in books {
            if store.exists(&book.isbn)? {
                tracing::warn!(isbn = %book.isbn, "Skipping duplicate ISBN");
                report.skipped += 1;
                continue;
            }
            store.add(book)?;
            report.imported += 1;
        }

        Ok(report)
    }
}

fn require_isbn(isbn: &str) -> CatalogResult<()> {
    if isbn.trim().is_empty() {
        return Err(CatalogError::Validation("isbn must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn book(isbn: &str) -> Book {
        Book::new(
            isbn,
            "A",
            vec!["X".to_string()],
            "P",
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        )
    }

    fn service(temp_dir: &TempDir) -> CatalogService {
        CatalogService::open(temp_dir.path().join("db.csv")).unwrap()
    }

    #[test]
    fn test_create_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        service.create(&book("111")).unwrap();
        let err = service.create(&book("111")).unwrap_err();

        assert!(matches!(err, CatalogError::Conflict(ref isbn) if isbn == "111"));
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_create_validates_before_store() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let mut invalid = book("111");
        invalid.authors.clear();

        assert!(matches!(
            service.create(&invalid),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        assert!(matches!(
            service.delete("nope"),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(service.delete(""), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_update_rules() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        service.create(&book("1")).unwrap();
        service.create(&book("2")).unwrap();

        assert!(matches!(
            service.update("9", &book("3")),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            service.update("1", &book("2")),
            Err(CatalogError::Conflict(_))
        ));

        let mut renamed = book("1");
        renamed.title = "Renamed".to_string();
        service.update("1", &renamed).unwrap();

        let found = service.list(&BookFilter::by_isbn("1")).unwrap();
        assert_eq!(found, vec![renamed]);
        assert_eq!(service.count().unwrap(), 2);
    }

    #[test]
    fn test_archive_name_follows_store_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let archive = service.archive().unwrap();
        assert_eq!(archive.file_name, "db.zip");
        assert!(!archive.bytes.is_empty());
    }

    #[test]
    fn test_hash_changes_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let empty = service.hash().unwrap();
        service.create(&book("1")).unwrap();
        assert_ne!(empty, service.hash().unwrap());
    }

    #[test]
    fn test_import_invalid_record_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let mut invalid = book("2");
        invalid.title.clear();

        assert!(matches!(
            service.import(&[book("1"), invalid]),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_import_skips_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        service.create(&book("1")).unwrap();

        let report = service
            .import(&[book("1"), book("2"), book("2"), book("3")])
            .unwrap();

        assert_eq!(
            report,
            ImportReport {
                imported: 2,
                skipped: 2
            }
        );
        assert_eq!(service.count().unwrap(), 3);
    }
}
