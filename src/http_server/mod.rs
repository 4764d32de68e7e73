//! # Bookshelf HTTP Server Module
//!
//! HTTP facade over the catalog service. Holds no state of its own beyond
//! the shared [`CatalogService`](crate::catalog::CatalogService).
//!
//! # Endpoints
//!
//! - `GET /` - List books, filtered by `isbn`, `title`, `author`,
//!   `publisher`, `publishDate`
//! - `POST /` - Create a book (409 if the ISBN exists)
//! - `PUT /?oldIsbn=` - Replace a book (404 if absent)
//! - `DELETE /?isbn=` - Remove a book (404 if absent)
//! - `GET /count` - Number of books
//! - `GET /download-db` - Zipped store file
//! - `GET /db-hash` - SHA-256 of the store file
//! - `GET /health` - Health check

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, MessageResponse};
pub use server::HttpServer;
