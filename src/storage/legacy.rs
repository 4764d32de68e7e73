//! Import-only reader for the legacy plain store format
//!
//! Legacy rows are comma-joined with the authors written as a bracketed,
//! quoted list:
//!
//! ```text
//! 111,Good Omens,['Terry Pratchett', 'Neil Gaiman'],Gollancz,1990-05-01
//! ```
//!
//! The first two fields are ISBN and title, the last two publisher and
//! date, everything between is the authors list. A title or publisher
//! containing a comma cannot be read back from this format, which is why it
//! is never written.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use super::errors::{StorageError, StorageResult};
use crate::catalog::Book;

const MIN_FIELDS: usize = 5;

/// Parse one legacy row into a validated book.
pub fn parse_legacy_line(line: &str) -> Result<Book, String> {
    let parts: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
    if parts.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {} comma-separated fields, found {}",
            MIN_FIELDS,
            parts.len()
        ));
    }

    let last = parts.len() - 1;
    let date_text = parts[last].trim();
    let publish_date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|e| format!("invalid publish_date '{}': {}", date_text, e))?;

    let authors = parts[2..last - 1]
        .iter()
        .map(|raw| strip_list_syntax(raw))
        .collect();

    let book = Book::new(parts[0], parts[1], authors, parts[last - 1], publish_date);
    book.validate().map_err(|e| e.to_string())?;

    Ok(book)
}

/// Strip list brackets and quotes from either end of one author fragment.
///
/// Each end is trimmed on its own: a name with a comma inside the quotes
/// arrives here as two fragments, each carrying only one quote.
fn strip_list_syntax(raw: &str) -> String {
    raw.trim()
        .trim_matches(['[', ']'])
        .trim()
        .trim_matches(['\'', '"'])
        .trim()
        .to_string()
}

/// Parse a whole legacy file. Blank lines are skipped.
pub fn read_legacy_file(path: &Path) -> StorageResult<Vec<Book>> {
    let content = fs::read_to_string(path).map_err(|e| {
        StorageError::io_error(format!("Failed to read legacy file: {}", path.display()), e)
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_legacy_line(line)
                .map_err(|reason| StorageError::parse_at_line(index as u64 + 1, reason))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_single_author() {
        let book = parse_legacy_line("111,A,['X'],P,2020-01-01\n").unwrap();
        assert_eq!(book.isbn, "111");
        assert_eq!(book.title, "A");
        assert_eq!(book.authors, vec!["X"]);
        assert_eq!(book.publisher, "P");
        assert_eq!(book.publish_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_multiple_authors() {
        let book =
            parse_legacy_line("222,Good Omens,['Terry Pratchett', 'Neil Gaiman'],Gollancz,1990-05-01")
                .unwrap();
        assert_eq!(book.authors, vec!["Terry Pratchett", "Neil Gaiman"]);
        assert_eq!(book.publisher, "Gollancz");
    }

    #[test]
    fn test_double_quoted_author_keeps_apostrophe() {
        let book = parse_legacy_line("333,T,[\"Flann O'Brien\"],P,1939-03-13").unwrap();
        assert_eq!(book.authors, vec!["Flann O'Brien"]);
    }

    #[test]
    fn test_author_with_comma_loses_quotes() {
        let book = parse_legacy_line("1,T,['Doe, Jane'],P,2020-01-01").unwrap();
        assert_eq!(book.authors, vec!["Doe", "Jane"]);

        let book = parse_legacy_line("2,T,['Doe, Jane', 'Roe'],P,2020-01-01").unwrap();
        assert_eq!(book.authors, vec!["Doe", "Jane", "Roe"]);
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_legacy_line("111,A,P,2020-01-01").unwrap_err();
        assert!(err.contains("at least 5"));
    }

    #[test]
    fn test_empty_author_list_rejected() {
        assert!(parse_legacy_line("111,A,[],P,2020-01-01").is_err());
    }

    #[test]
    fn test_file_reports_failing_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.txt");
        fs::write(&path, "1,A,['X'],P,2020-01-01\n\n2,B,['Y'],P,not-a-date\n").unwrap();

        let err = read_legacy_file(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_file_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.txt");
        fs::write(&path, "1,A,['X'],P,2020-01-01\n\n2,B,['Y', 'Z'],Q,2021-06-30\n").unwrap();

        let books = read_legacy_file(&path).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[1].authors, vec!["Y", "Z"]);
    }
}
