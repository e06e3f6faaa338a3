//! Typed queries for the `books` table.

use crate::DbBackend;
use serde::{Deserialize, Serialize};
use sqlx::Executor;

/// One catalog row. The id is assigned by the store and immutable.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BooksRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
}

/// Field set for inserts and full-row updates.
#[derive(Debug, Clone)]
pub struct NewBook<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub year: i64,
}

/// Insert a new book and return the id assigned by the store.
pub async fn insert_book<'e, E>(executor: E, book: &NewBook<'_>) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    sqlx::query_scalar("INSERT INTO books (title, author, year) VALUES (?, ?, ?) RETURNING id")
        .bind(book.title)
        .bind(book.author)
        .bind(book.year)
        .fetch_one(executor)
        .await
}

/// Overwrite every mutable field of one row. Returns the number of rows
/// affected; zero means the id does not exist.
pub async fn update_book<'e, E>(
    executor: E,
    id: i64,
    book: &NewBook<'_>,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    let result = sqlx::query("UPDATE books SET title = ?, author = ?, year = ? WHERE id = ?")
        .bind(book.title)
        .bind(book.author)
        .bind(book.year)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Delete one row. Returns the number of rows affected.
pub async fn delete_book<'e, E>(executor: E, id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<BooksRow>, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    sqlx::query_as("SELECT id, title, author, year FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// One page of rows in id order.
pub async fn list_page<'e, E>(
    executor: E,
    limit: i64,
    offset: i64,
) -> Result<Vec<BooksRow>, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    sqlx::query_as("SELECT id, title, author, year FROM books ORDER BY id LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
}

pub async fn count_books<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(executor)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, ensure_schema, DbConnectionConfig};

    async fn memory_pool() -> crate::DbPool {
        let config = DbConnectionConfig::new("sqlite::memory:");
        let pool = create_pool(&config).await.expect("create pool");
        ensure_schema(&pool).await.expect("ensure schema");
        pool
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let pool = memory_pool().await;

        let first = insert_book(
            &pool,
            &NewBook {
                title: "Dom Casmurro",
                author: "Machado de Assis",
                year: 1899,
            },
        )
        .await
        .expect("insert");
        let second = insert_book(
            &pool,
            &NewBook {
                title: "Vidas Secas",
                author: "Graciliano Ramos",
                year: 1938,
            },
        )
        .await
        .expect("insert");

        assert!(second > first);
        assert_eq!(count_books(&pool).await.expect("count"), 2);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let pool = memory_pool().await;

        let book = NewBook {
            title: "Grande Sertão: Veredas",
            author: "Guimarães Rosa",
            year: 1956,
        };
        let id = insert_book(&pool, &book).await.expect("insert");

        let affected = update_book(
            &pool,
            id,
            &NewBook {
                year: 1956,
                ..book.clone()
            },
        )
        .await
        .expect("update");
        assert_eq!(affected, 1);
        assert_eq!(update_book(&pool, id + 100, &book).await.expect("update"), 0);

        assert_eq!(delete_book(&pool, id).await.expect("delete"), 1);
        assert_eq!(delete_book(&pool, id).await.expect("delete"), 0);
        assert!(find_by_id(&pool, id).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn list_page_slices_in_id_order() {
        let pool = memory_pool().await;

        for i in 0..5 {
            insert_book(
                &pool,
                &NewBook {
                    title: &format!("Volume {i}"),
                    author: "Anon",
                    year: 2000 + i,
                },
            )
            .await
            .expect("insert");
        }

        let page = list_page(&pool, 2, 2).await.expect("list");
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "Volume 2");
        assert_eq!(page[1].title, "Volume 3");

        let past_end = list_page(&pool, 10, 100).await.expect("list");
        assert!(past_end.is_empty());
    }
}
