//! Equality filters over book records
//!
//! String predicates compare case-insensitively; the date predicate is exact.
//! `author` matches when any entry of the authors list equals it.

use chrono::NaiveDate;
use serde::Deserialize;

use super::book::Book;
use super::errors::{CatalogError, CatalogResult};

/// A set of optional predicates. All present predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilter {
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default, alias = "publish_date")]
    pub publish_date: Option<NaiveDate>,
}

impl BookFilter {
    /// Filter matching every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a single ISBN
    pub fn by_isbn(isbn: impl Into<String>) -> Self {
        Self {
            isbn: Some(isbn.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_publish_date(mut self, date: NaiveDate) -> Self {
        self.publish_date = Some(date);
        self
    }

    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        self.isbn.is_none()
            && self.title.is_none()
            && self.author.is_none()
            && self.publisher.is_none()
            && self.publish_date.is_none()
    }

    /// Reject present-but-empty string predicates.
    pub fn validate(&self) -> CatalogResult<()> {
        let fields = [
            ("isbn", &self.isbn),
            ("title", &self.title),
            ("author", &self.author),
            ("publisher", &self.publisher),
        ];
        for (name, value) in fields {
            if matches!(value, Some(v) if v.is_empty()) {
                return Err(CatalogError::Validation(format!(
                    "filter '{}' must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Whether `book` satisfies every present predicate
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref isbn) = self.isbn {
            if !eq_ignore_case(isbn, &book.isbn) {
                return false;
            }
        }
        if let Some(ref title) = self.title {
            if !eq_ignore_case(title, &book.title) {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            if !book.has_author(author) {
                return false;
            }
        }
        if let Some(ref publisher) = self.publisher {
            if !eq_ignore_case(publisher, &book.publisher) {
                return false;
            }
        }
        if let Some(date) = self.publish_date {
            if date != book.publish_date {
                return false;
            }
        }
        true
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
