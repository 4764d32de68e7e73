//! Record store for bookshelf
//!
//! The store is a flat CSV file holding one book per line. There is no
//! in-memory index: every lookup re-reads the file and every removal
//! rewrites it in full.
//!
//! # On-disk schema (v1)
//!
//! ```text
//! isbn,title,authors,publisher,publish_date
//! 9780261103573,The Hobbit,J. R. R. Tolkien,Allen & Unwin,1937-09-21
//! 0-306-40615-2,"Good Omens",Terry Pratchett;Neil Gaiman,Gollancz,1990-05-01
//! ```
//!
//! - RFC 4180 quoting, `\n` line terminator
//! - `authors` is a single column, names joined by `;`
//! - The header row is optional on read and always written on rewrite
//!
//! The older comma-joined format with a bracketed authors list is only
//! readable through [`legacy`], never written.

mod archive;
mod checksum;
mod errors;
pub mod legacy;
mod reader;
mod record;
mod store;
mod writer;

pub use archive::zip_entry;
pub use checksum::content_hash;
pub use errors::{StorageError, StorageResult};
pub use record::{decode_books, encode_books, HEADER, SCHEMA_VERSION};
pub use store::BookStore;
