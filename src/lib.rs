//! bookshelf - a small book catalog served over HTTP
//!
//! Book records live in a flat CSV file keyed by ISBN. The HTTP facade maps
//! query parameters and JSON bodies onto create/read/update/delete, count,
//! hash and download operations.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod storage;
