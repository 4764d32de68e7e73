//! Record Store Property Tests
//!
//! Behaviour of the flat-file store as seen through its public operations:
//! add/exists, remove, update, count, round-tripping and parse failures.

use std::fs;

use bookshelf::catalog::{Book, BookFilter};
use bookshelf::storage::{decode_books, encode_books, BookStore, StorageError};
use chrono::NaiveDate;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn book(isbn: &str, title: &str, authors: &[&str]) -> Book {
    Book::new(
        isbn,
        title,
        authors.iter().map(|a| a.to_string()).collect(),
        "Publisher",
        date(2020, 1, 1),
    )
}

fn open_store(temp_dir: &TempDir) -> BookStore {
    BookStore::open(temp_dir.path().join("db.csv")).expect("Failed to open store")
}

fn isbns(store: &BookStore) -> Vec<String> {
    store
        .list(&BookFilter::all())
        .unwrap()
        .into_iter()
        .map(|b| b.isbn)
        .collect()
}

// =============================================================================
// add / exists / remove
// =============================================================================

/// Every added record is visible through `exists`.
#[test]
fn test_add_then_exists_for_many_records() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);

    let records = [
        book("111", "A", &["X"]),
        book("978-3-16-148410-0", "Commas, everywhere", &["Doe, Jane"]),
        book("  padded  ", "Quote \"inside\"", &["A", "B", "C"]),
    ];

    for record in &records {
        store.add(record).unwrap();
        assert!(store.exists(&record.isbn).unwrap());
    }
    assert_eq!(store.count().unwrap(), records.len());
}

/// Removing an added record succeeds and it is gone afterwards.
#[test]
fn test_remove_after_add() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);

    store.add(&book("111", "A", &["X"])).unwrap();
    assert!(store.remove("111").unwrap());
    assert!(!store.exists("111").unwrap());
}

/// Removing an absent ISBN returns false and leaves the file byte-identical.
#[test]
fn test_remove_absent_leaves_store_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.csv");
    let mut store = BookStore::open(&path).unwrap();
    store.add(&book("111", "A", &["X"])).unwrap();
    store.add(&book("222", "B", &["Y"])).unwrap();

    let before = fs::read(&path).unwrap();
    assert!(!store.remove("333").unwrap());
    assert_eq!(fs::read(&path).unwrap(), before);
}

// =============================================================================
// update
// =============================================================================

/// `update(old, new)` ends in the same state as `remove(old); add(new)`.
#[test]
fn test_update_equals_remove_then_add() {
    let updated_dir = TempDir::new().unwrap();
    let manual_dir = TempDir::new().unwrap();
    let mut updated = open_store(&updated_dir);
    let mut manual = open_store(&manual_dir);

    for store in [&mut updated, &mut manual] {
        store.add(&book("1", "A", &["X"])).unwrap();
        store.add(&book("2", "B", &["Y"])).unwrap();
        store.add(&book("3", "C", &["Z"])).unwrap();
    }

    let replacement = book("9", "New", &["W"]);
    assert!(updated.update("2", &replacement).unwrap());
    assert!(manual.remove("2").unwrap());
    manual.add(&replacement).unwrap();

    assert_eq!(
        updated.list(&BookFilter::all()).unwrap(),
        manual.list(&BookFilter::all()).unwrap()
    );
    assert_eq!(isbns(&updated), vec!["1", "3", "9"]);
}

/// Updating an absent ISBN is a no-op returning false.
#[test]
fn test_update_absent_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);
    store.add(&book("1", "A", &["X"])).unwrap();

    assert!(!store.update("404", &book("2", "B", &["Y"])).unwrap());
    assert_eq!(isbns(&store), vec!["1"]);
}

// =============================================================================
// count
// =============================================================================

/// Count tracks adds minus successful removes and ignores the header row.
#[test]
fn test_count_tracks_adds_and_removes() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);
    assert_eq!(store.count().unwrap(), 0);

    for i in 0..5 {
        store.add(&book(&i.to_string(), "T", &["A"])).unwrap();
    }
    assert!(store.remove("1").unwrap());
    assert!(store.remove("3").unwrap());
    assert!(!store.remove("3").unwrap());

    assert_eq!(store.count().unwrap(), 3);
}

/// Reopening an existing store keeps its records.
#[test]
fn test_reopen_keeps_records() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = open_store(&temp_dir);
        store.add(&book("1", "A", &["X"])).unwrap();
        store.add(&book("2", "B", &["Y"])).unwrap();
    }

    let store = open_store(&temp_dir);
    assert_eq!(isbns(&store), vec!["1", "2"]);
}

// =============================================================================
// list
// =============================================================================

/// Listing with filters returns matches in file order.
#[test]
fn test_list_filters_in_file_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);
    store.add(&book("1", "Dune", &["Frank Herbert"])).unwrap();
    store.add(&book("2", "Emma", &["Jane Austen"])).unwrap();
    store
        .add(&book("3", "Dune Messiah", &["Frank Herbert", "Editor"]))
        .unwrap();

    let by_author = store
        .list(&BookFilter::all().with_author("FRANK HERBERT"))
        .unwrap();
    let found: Vec<_> = by_author.iter().map(|b| b.isbn.as_str()).collect();
    assert_eq!(found, vec!["1", "3"]);

    let by_title = store.list(&BookFilter::all().with_title("dune")).unwrap();
    assert_eq!(by_title.len(), 1);

    let by_date = store
        .list(&BookFilter::all().with_publish_date(date(1999, 1, 1)))
        .unwrap();
    assert!(by_date.is_empty());
}

// =============================================================================
// Round-trip and parse failures
// =============================================================================

/// Serializing then parsing yields the original records.
#[test]
fn test_round_trip_preserves_records() {
    let records = vec![
        book("1", "Plain", &["One"]),
        book("2", "Comma, title", &["Last, First", "Second"]),
        book("3", "Multi\nline", &["O'Brien"]),
        Book::new("4", "Ünïcödé", vec!["Zoë".to_string()], "Éditions", date(1900, 1, 1)),
    ];

    let bytes = encode_books(&records, true).unwrap();
    assert_eq!(decode_books(bytes.as_slice()).unwrap(), records);
}

/// A malformed stored line surfaces as a parse error from every read path.
#[test]
fn test_malformed_line_fails_reads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.csv");
    let store = BookStore::open(&path).unwrap();

    fs::write(
        &path,
        "isbn,title,authors,publisher,publish_date\n1,A,X,P,2020-01-01\n2,B,Y,P,yesterday\n",
    )
    .unwrap();

    for result in [
        store.count().map(|_| ()),
        store.exists("1").map(|_| ()),
        store.list(&BookFilter::all()).map(|_| ()),
    ] {
        match result {
            Err(StorageError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    assert!(BookStore::open(&path).unwrap_err().is_parse_error());
}

// =============================================================================
// Scenario
// =============================================================================

/// empty → add 111 → count 1 → list{isbn:111} → remove → count 0
#[test]
fn test_basic_lifecycle_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);
    let record = book("111", "A", &["X"]);

    store.add(&record).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(
        store.list(&BookFilter::by_isbn("111")).unwrap(),
        vec![record]
    );
    assert!(store.remove("111").unwrap());
    assert_eq!(store.count().unwrap(), 0);
}
