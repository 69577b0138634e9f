use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::User;

/// Insert a new user record. The caller hashes the password; plaintext never
/// reaches this layer. Duplicate emails surface as a database unique
/// violation, which is authoritative even under concurrent registration.
pub async fn insert_user(
    pool: &PgPool,
    firstname: &str,
    lastname: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, firstname, lastname, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, firstname, lastname, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(firstname)
    .bind(lastname)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, firstname, lastname, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, firstname, lastname, email, password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
