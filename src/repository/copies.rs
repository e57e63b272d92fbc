//! Book copies repository (inventory ledger storage)

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{copy::BookCopy, copy::NEW_COPY_CONDITION, enums::CopyStatus},
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Count copies of a book in the given state
    pub async fn count_by_status(&self, book_id: i32, status: CopyStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_copies WHERE book_id = $1 AND status = $2",
        )
        .bind(book_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// List copies of a book
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookCopy>> {
        let copies = sqlx::query_as::<_, BookCopy>(
            "SELECT * FROM book_copies WHERE book_id = $1 ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(copies)
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_copies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Append `count` available copies in "New" condition
    pub async fn add(&self, conn: &mut PgConnection, book_id: i32, count: i32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO book_copies (book_id, status, condition)
            SELECT $1, $2, $3 FROM generate_series(1, $4)
            "#,
        )
        .bind(book_id)
        .bind(CopyStatus::Available)
        .bind(NEW_COPY_CONDITION)
        .bind(count)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Flip the lowest-id available copy of a book to BORROWED and return it.
    ///
    /// Copies locked by a concurrent allocation are skipped, so two callers
    /// never receive the same copy. Returns `None` when nothing is available.
    pub async fn allocate(&self, conn: &mut PgConnection, book_id: i32) -> AppResult<Option<BookCopy>> {
        let copy = sqlx::query_as::<_, BookCopy>(
            r#"
            UPDATE book_copies
            SET status = $2
            WHERE id = (
                SELECT id FROM book_copies
                WHERE book_id = $1 AND status = $3
                ORDER BY id
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            AND status = $3
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(CopyStatus::Borrowed)
        .bind(CopyStatus::Available)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(copy)
    }

    /// Mark a copy AVAILABLE again
    pub async fn release(&self, conn: &mut PgConnection, copy_id: i32) -> AppResult<()> {
        sqlx::query("UPDATE book_copies SET status = $2 WHERE id = $1")
            .bind(copy_id)
            .bind(CopyStatus::Available)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
