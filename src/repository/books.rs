//! Books repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookShort, CreateBook},
};

const BOOK_SHORT_SELECT: &str = r#"
    SELECT b.id, b.title, b.cover_url, b.rating,
           COUNT(c.id) AS total_copies,
           COUNT(c.id) FILTER (WHERE c.status = 'AVAILABLE') AS available_copies
    FROM books b
    LEFT JOIN book_copies c ON c.book_id = b.id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get the book a copy belongs to, inside a transaction
    pub async fn get_by_copy(&self, conn: &mut PgConnection, copy_id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT b.* FROM books b
            JOIN book_copies c ON c.book_id = b.id
            WHERE c.id = $1
            "#,
        )
        .bind(copy_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No book for copy {}", copy_id)))
    }

    /// Get book with stock figures
    pub async fn get_short(&self, id: i32) -> AppResult<BookShort> {
        let query = format!("{} WHERE b.id = $1 GROUP BY b.id", BOOK_SHORT_SELECT);
        sqlx::query_as::<_, BookShort>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search books by title fragment with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let pattern = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q.to_lowercase()));

        let where_clause = if pattern.is_some() {
            "WHERE LOWER(b.title) LIKE $1"
        } else {
            ""
        };

        let count_q = format!("SELECT COUNT(*) FROM books b {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref p) = pattern {
            count_builder = count_builder.bind(p);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_q = format!(
            "{} {} GROUP BY b.id ORDER BY b.title, b.id LIMIT {} OFFSET {}",
            BOOK_SHORT_SELECT,
            where_clause,
            query.per_page(),
            query.offset()
        );
        let mut builder = sqlx::query_as::<_, BookShort>(&select_q);
        if let Some(ref p) = pattern {
            builder = builder.bind(p);
        }
        let books = builder.fetch_all(&self.pool).await?;

        Ok((books, total))
    }

    /// Insert a book
    pub async fn create(&self, conn: &mut PgConnection, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, cover_url)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(book.title.trim())
        .bind(&book.description)
        .bind(&book.cover_url)
        .fetch_one(&mut *conn)
        .await?;
        Ok(created)
    }

    /// Count books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
