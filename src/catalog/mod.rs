//! Book catalog domain
//!
//! - [`Book`]: the record and its validation rules
//! - [`BookFilter`]: equality predicates used by listing
//! - [`CatalogService`]: uniqueness and not-found rules over the store

mod book;
mod errors;
mod filter;
mod service;

pub use book::{Book, AUTHOR_SEPARATOR};
pub use errors::{CatalogError, CatalogResult};
pub use filter::BookFilter;
pub use service::{CatalogService, ImportReport, StoreArchive};
