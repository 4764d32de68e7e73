//! Book record type
//!
//! A book is identified by its ISBN. JSON uses camelCase field names
//! (`publishDate`), the on-disk row uses the snake_case column names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// Separator between author names inside the `authors` column.
pub const AUTHOR_SEPARATOR: char = ';';

/// A single book entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique key
    pub isbn: String,
    pub title: String,
    /// Ordered author names, at least one
    pub authors: Vec<String>,
    pub publisher: String,
    #[serde(alias = "publish_date")]
    pub publish_date: NaiveDate,
}

impl Book {
    /// Create a new book record
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        authors: Vec<String>,
        publisher: impl Into<String>,
        publish_date: NaiveDate,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            authors,
            publisher: publisher.into(),
            publish_date,
        }
    }

    /// Check the required-field rules.
    ///
    /// Fails on the first violated rule. An author name containing
    /// [`AUTHOR_SEPARATOR`] is rejected because it could not be read back
    /// as the same list.
    pub fn validate(&self) -> CatalogResult<()> {
        require_non_empty("isbn", &self.isbn)?;
        require_non_empty("title", &self.title)?;
        require_non_empty("publisher", &self.publisher)?;

        if self.authors.is_empty() {
            return Err(CatalogError::Validation(
                "authors must contain at least one name".to_string(),
            ));
        }

        for author in &self.authors {
            require_non_empty("author", author)?;
            if author.contains(AUTHOR_SEPARATOR) {
                return Err(CatalogError::Validation(format!(
                    "author '{}' must not contain '{}'",
                    author, AUTHOR_SEPARATOR
                )));
            }
        }

        Ok(())
    }

    /// Whether any author matches `name`, ignoring case.
    pub fn has_author(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.authors.iter().any(|a| a.to_lowercase() == name)
    }
}

fn require_non_empty(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
