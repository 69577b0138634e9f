use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Book;

pub async fn insert_book(
    pool: &PgPool,
    name: &str,
    description: &str,
    author: &str,
) -> Result<Book, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Book>(
        r#"
        INSERT INTO books (id, name, description, author, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, description, author, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(author)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_all(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        r#"
        SELECT id, name, description, author, created_at, updated_at
        FROM books
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        r#"
        SELECT id, name, description, author, created_at, updated_at
        FROM books
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Partial update: absent fields keep their stored value. Returns None when
/// the id does not exist, leaving nothing modified.
pub async fn update_book(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    author: Option<&str>,
) -> Result<Option<Book>, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Book>(
        r#"
        UPDATE books
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            author = COALESCE($4, author),
            updated_at = $5
        WHERE id = $1
        RETURNING id, name, description, author, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(author)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Returns false when no row matched the id.
pub async fn delete_book(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
