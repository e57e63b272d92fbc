//! Borrow requests repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        enums::{RequestStatus, RequestType},
        request::{BookRequest, BookRequestDetails},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.user_id, u.username, r.book_id, b.title AS book_title,
           r.book_loan_id, r.type, r.status, r.created_at, r.updated_at
    FROM book_requests r
    JOIN users u ON u.id = r.user_id
    JOIN books b ON b.id = r.book_id
"#;

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a PENDING borrow request.
    ///
    /// Returns `None` when the user already has a pending request for the book;
    /// the partial unique index makes this hold under concurrent submissions.
    pub async fn insert_pending(&self, user_id: i32, book_id: i32) -> AppResult<Option<BookRequest>> {
        let request = sqlx::query_as::<_, BookRequest>(
            r#"
            INSERT INTO book_requests (user_id, book_id, type, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, book_id) WHERE status = 'PENDING' DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(RequestType::Borrowing)
        .bind(RequestStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    /// Whether the user already has a PENDING request for the book
    pub async fn has_pending(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_requests WHERE user_id = $1 AND book_id = $2 AND status = $3)",
        )
        .bind(user_id)
        .bind(book_id)
        .bind(RequestStatus::Pending)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Load a request and lock it for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<BookRequest>> {
        let request = sqlx::query_as::<_, BookRequest>(
            "SELECT * FROM book_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(request)
    }

    /// Record a decision, linking the created loan when there is one
    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status: RequestStatus,
        book_loan_id: Option<i32>,
    ) -> AppResult<BookRequest> {
        let request = sqlx::query_as::<_, BookRequest>(
            r#"
            UPDATE book_requests
            SET status = $2, book_loan_id = COALESCE($3, book_loan_id), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(book_loan_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(request)
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM book_requests WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// A user's requests, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BookRequestDetails>> {
        let query = format!(
            "{} WHERE r.user_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            DETAILS_SELECT
        );
        let requests = sqlx::query_as::<_, BookRequestDetails>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    /// Every request, PENDING first, then newest first
    pub async fn list_all(&self) -> AppResult<Vec<BookRequestDetails>> {
        let query = format!(
            r#"{}
            ORDER BY CASE r.status WHEN 'PENDING' THEN 0 WHEN 'ACCEPTED' THEN 1 ELSE 2 END,
                     r.created_at DESC, r.id DESC"#,
            DETAILS_SELECT
        );
        let requests = sqlx::query_as::<_, BookRequestDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    pub async fn count_by_status(&self, status: RequestStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_requests WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
