use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::books;
use crate::database::models::Book;
use crate::error::ApiError;
use crate::services::validate::FieldErrors;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    // The create payload names this field "label"; it is stored and
    // returned as "name"
    pub label: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// POST /api/books - Create a book
pub async fn book_create(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut errors = FieldErrors::new();
    let label = errors.require("label", &request.label);
    let description = errors.require("description", &request.description);
    let author = errors.require("author", &request.author);

    let (label, description, author) = match (label, description, author) {
        (Some(label), Some(description), Some(author)) if errors.is_empty() => {
            (label, description, author)
        }
        _ => return Err(errors.into_error()),
    };

    let book = books::insert_book(&state.pool, label, description, author).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/books/:id - Update any subset of a book's fields
///
/// Absent fields are left untouched; fields that are present but empty are
/// rejected. Unknown ids return 404 with no side effects.
pub async fn book_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    let mut errors = FieldErrors::new();
    for (field, value) in [
        ("name", &request.name),
        ("description", &request.description),
        ("author", &request.author),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.reject(field, "Must not be empty");
        }
    }
    errors.check()?;

    let book = books::update_book(
        &state.pool,
        id,
        request.name.as_deref().map(str::trim),
        request.description.as_deref().map(str::trim),
        request.author.as_deref().map(str::trim),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Book not found"))?;

    Ok(Json(book))
}

/// DELETE /api/books/:id - Delete a book
pub async fn book_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let deleted = books::delete_book(&state.pool, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Book not found"));
    }

    Ok(Json(json!({ "message": "Book deleted" })))
}
