//! Loans repository for database operations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        dashboard::TrendingBook,
        enums::LoanStatus,
        loan::{BookLoan, LoanDetails},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT l.id, l.user_id, u.username, l.book_copy_id, c.book_id, b.title AS book_title,
           l.loan_date, l.due_date, l.return_date, l.status,
           (l.status = 'BORROWED' AND l.due_date < NOW()) AS is_overdue
    FROM book_loans l
    JOIN users u ON u.id = l.user_id
    JOIN book_copies c ON c.id = l.book_copy_id
    JOIN books b ON b.id = c.book_id
"#;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookLoan> {
        sqlx::query_as::<_, BookLoan>("SELECT * FROM book_loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Insert a BORROWED loan for an allocated copy
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: i32,
        book_copy_id: i32,
        loan_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<BookLoan> {
        let loan = sqlx::query_as::<_, BookLoan>(
            r#"
            INSERT INTO book_loans (user_id, book_copy_id, loan_date, due_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_copy_id)
        .bind(loan_date)
        .bind(due_date)
        .bind(LoanStatus::Borrowed)
        .fetch_one(&mut *conn)
        .await?;
        Ok(loan)
    }

    /// Load a loan and lock it for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<BookLoan>> {
        let loan = sqlx::query_as::<_, BookLoan>("SELECT * FROM book_loans WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(loan)
    }

    pub async fn mark_returned(
        &self,
        conn: &mut PgConnection,
        id: i32,
        return_date: DateTime<Utc>,
    ) -> AppResult<BookLoan> {
        let loan = sqlx::query_as::<_, BookLoan>(
            r#"
            UPDATE book_loans
            SET status = $2, return_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(LoanStatus::Returned)
        .bind(return_date)
        .fetch_one(&mut *conn)
        .await?;
        Ok(loan)
    }

    /// A user's loan history, newest first, optionally narrowed to one status
    pub async fn list_for_user(
        &self,
        user_id: i32,
        status: Option<LoanStatus>,
    ) -> AppResult<Vec<LoanDetails>> {
        let loans = match status {
            Some(status) => {
                let query = format!(
                    "{} WHERE l.user_id = $1 AND l.status = $2 ORDER BY l.loan_date DESC, l.id DESC",
                    DETAILS_SELECT
                );
                sqlx::query_as::<_, LoanDetails>(&query)
                    .bind(user_id)
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "{} WHERE l.user_id = $1 ORDER BY l.loan_date DESC, l.id DESC",
                    DETAILS_SELECT
                );
                sqlx::query_as::<_, LoanDetails>(&query)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(loans)
    }

    /// All loans, newest first
    pub async fn list_all(&self) -> AppResult<Vec<LoanDetails>> {
        let query = format!("{} ORDER BY l.loan_date DESC, l.id DESC", DETAILS_SELECT);
        let loans = sqlx::query_as::<_, LoanDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_loans WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Loans started per UTC day since `since` (inclusive). Days without loans are absent.
    pub async fn daily_counts(&self, since: NaiveDate) -> AppResult<Vec<(NaiveDate, i64)>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT (loan_date AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS value
            FROM book_loans
            WHERE (loan_date AT TIME ZONE 'UTC')::date >= $1
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Most borrowed titles of all time
    pub async fn trending(&self, limit: i64) -> AppResult<Vec<TrendingBook>> {
        let books = sqlx::query_as::<_, TrendingBook>(
            r#"
            SELECT b.id, b.title, COUNT(l.id) AS borrow_count
            FROM book_loans l
            JOIN book_copies c ON c.id = l.book_copy_id
            JOIN books b ON b.id = c.book_id
            GROUP BY b.id, b.title
            ORDER BY borrow_count DESC, b.title
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}
