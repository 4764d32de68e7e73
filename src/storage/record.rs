//! CSV row encoding for book records
//!
//! One book is one CSV record with five fields in fixed order, see
//! [`HEADER`]. The authors list is joined with
//! [`AUTHOR_SEPARATOR`](crate::catalog::AUTHOR_SEPARATOR) into one field, so
//! the CSV quoting handles commas inside any value.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use super::errors::{StorageError, StorageResult};
use crate::catalog::{Book, AUTHOR_SEPARATOR};

/// Column names, in on-disk order. Doubles as the v1 schema marker.
pub const HEADER: [&str; 5] = ["isbn", "title", "authors", "publisher", "publish_date"];

/// Version of the on-disk layout described by [`HEADER`]
pub const SCHEMA_VERSION: u32 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a book as its five column values
fn to_row(book: &Book) -> [String; 5] {
    let separator = AUTHOR_SEPARATOR.to_string();
    [
        book.isbn.clone(),
        book.title.clone(),
        book.authors.join(&separator),
        book.publisher.clone(),
        book.publish_date.format(DATE_FORMAT).to_string(),
    ]
}

/// Decode one CSV record into a validated book.
fn from_row(record: &StringRecord) -> Result<Book, String> {
    if record.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            record.len()
        ));
    }

    let authors = record[2]
        .split(AUTHOR_SEPARATOR)
        .map(str::to_string)
        .collect();

    let publish_date = NaiveDate::parse_from_str(&record[4], DATE_FORMAT)
        .map_err(|e| format!("invalid publish_date '{}': {}", &record[4], e))?;

    let book = Book::new(&record[0], &record[1], authors, &record[3], publish_date);
    book.validate().map_err(|e| e.to_string())?;

    Ok(book)
}

fn is_header(record: &StringRecord) -> bool {
    record.iter().eq(HEADER.iter().copied())
}

/// Serialize books to CSV bytes, optionally preceded by the header row.
pub fn encode_books<'a, I>(books: I, with_header: bool) -> StorageResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if with_header {
        writer
            .write_record(HEADER)
            .map_err(|e| StorageError::from_csv(e, "Failed to encode header"))?;
    }

    for book in books {
        writer
            .write_record(&to_row(book))
            .map_err(|e| StorageError::from_csv(e, "Failed to encode record"))?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::io_error("Failed to flush CSV buffer", e.into_error()))
}

/// Parse every record from a CSV source, in order.
///
/// A header row is skipped only when it is the first record. Any record
/// that fails to decode aborts the whole read with its line number.
pub fn decode_books<R: Read>(input: R) -> StorageResult<Vec<Book>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut books = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| StorageError::from_csv(e, "Failed to read store file"))?;

        if index == 0 && is_header(&record) {
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);
        let book = from_row(&record).map_err(|reason| StorageError::parse_at_line(line, reason))?;
        books.push(book);
    }

    Ok(books)
}
