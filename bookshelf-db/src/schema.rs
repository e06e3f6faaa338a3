use crate::{DbError, DbPool};

#[cfg(feature = "sqlite")]
const CREATE_BOOKS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL
)"#;

#[cfg(feature = "postgres")]
const CREATE_BOOKS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS books (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year BIGINT NOT NULL
)"#;

#[cfg(feature = "mysql")]
const CREATE_BOOKS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS books (
    id BIGINT PRIMARY KEY AUTO_INCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year BIGINT NOT NULL
)"#;

/// Create the catalog schema if it does not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), DbError> {
    sqlx::query(CREATE_BOOKS_TABLE).execute(pool).await?;
    tracing::debug!("books table ensured");
    Ok(())
}
