//! Book HTTP Routes
//!
//! Listing, creation, update and deletion of books, plus count, hash and
//! store download.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{ApiError, MessageResponse};
use crate::catalog::{Book, BookFilter, CatalogService};

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize, Deserialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HashResponse {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookQuery {
    pub isbn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookQuery {
    #[serde(alias = "old_isbn")]
    pub old_isbn: String,
}

// ==================
// Book Routes
// ==================

/// Create book routes
pub fn book_routes(state: Arc<CatalogService>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_books_handler)
                .post(create_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route("/count", get(count_books_handler))
        .route("/download-db", get(download_db_handler))
        .route("/db-hash", get(db_hash_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_books_handler(
    State(state): State<Arc<CatalogService>>,
    query: Result<Query<BookFilter>, QueryRejection>,
) -> Result<Json<BooksResponse>, ApiError> {
    let Query(filter) = query?;

    info!(filter = ?filter, "Getting all books");
    let books = state.list(&filter)?;
    info!(count = books.len(), "Got all books");

    Ok(Json(BooksResponse { books }))
}

async fn create_book_handler(
    State(state): State<Arc<CatalogService>>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(book) = payload?;

    info!(book = ?book, "Adding book to database");
    if let Err(e) = state.create(&book) {
        if e.is_client_error() {
            info!(isbn = %book.isbn, error = %e, "Book rejected");
        }
        return Err(e.into());
    }
    info!(isbn = %book.isbn, "Book added");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Book added"))))
}

async fn delete_book_handler(
    State(state): State<Arc<CatalogService>>,
    query: Result<Query<DeleteBookQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(DeleteBookQuery { isbn }) = query?;

    info!(isbn = %isbn, "Removing book");
    state.delete(&isbn)?;
    info!(isbn = %isbn, "Book removed");

    Ok(Json(MessageResponse::new("Removed")))
}

async fn update_book_handler(
    State(state): State<Arc<CatalogService>>,
    query: Result<Query<UpdateBookQuery>, QueryRejection>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(UpdateBookQuery { old_isbn }) = query?;
    let Json(book) = payload?;

    info!(old_isbn = %old_isbn, book = ?book, "Updating book");
    state.update(&old_isbn, &book)?;
    info!(old_isbn = %old_isbn, isbn = %book.isbn, "Book updated");

    Ok(Json(MessageResponse::new("Book updated")))
}

async fn count_books_handler(
    State(state): State<Arc<CatalogService>>,
) -> Result<Json<CountResponse>, ApiError> {
    info!("Counting books");
    let count = state.count()?;
    Ok(Json(CountResponse { count }))
}

async fn download_db_handler(
    State(state): State<Arc<CatalogService>>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Downloading DB CSV");
    let archive = state.archive()?;

    let disposition = format!("attachment; filename=\"{}\"", archive.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    ))
}

async fn db_hash_handler(
    State(state): State<Arc<CatalogService>>,
) -> Result<Json<HashResponse>, ApiError> {
    info!("Getting DB hash");
    let hash = state.hash()?;
    Ok(Json(HashResponse { hash }))
}
