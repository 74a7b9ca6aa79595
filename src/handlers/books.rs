use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::json;

use crate::error::ApiError;
use crate::response;
use crate::store::BookStore;

pub const ALLOWED_METHODS: &str = "GET,OPTIONS";

/// GET /getBooks — every book in the table, wrapped with a count.
pub async fn get_books(store: &impl BookStore) -> Result<Response<Body>, ApiError> {
    let books = store.list_books().await?;
    let count = books.len();
    let body = json!({ "books": books, "count": count });
    Ok(response::json(StatusCode::OK, ALLOWED_METHODS, &body))
}

/// GET /getBooks/{id} — point lookup, 404 on a miss.
pub async fn get_book(store: &impl BookStore, id: &str) -> Result<Response<Body>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("book id is required"));
    }

    match store.get_book(id).await? {
        Some(book) => Ok(response::json(StatusCode::OK, ALLOWED_METHODS, &book)),
        None => Err(ApiError::not_found("book not found")),
    }
}
