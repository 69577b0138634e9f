use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::database::books;
use crate::database::models::Book;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/books - List all books
pub async fn books_list(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = books::find_all(&state.pool).await?;
    Ok(Json(books))
}

/// GET /api/books/:id - Fetch a single book
pub async fn book_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Book>, ApiError> {
    let book = books::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Book not found"))?;

    Ok(Json(book))
}
