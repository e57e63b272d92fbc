//! Fines repository

use rust_decimal::Decimal;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::fine::{Fine, FineDetails},
};

const DETAILS_SELECT: &str = r#"
    SELECT f.id, f.user_id, u.username, f.book_loan_id, f.amount, f.description, f.created_at
    FROM fines f
    JOIN users u ON u.id = f.user_id
"#;

#[derive(Clone)]
pub struct FinesRepository {
    pool: Pool<Postgres>,
}

impl FinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: i32,
        book_loan_id: Option<i32>,
        amount: Decimal,
        description: Option<&str>,
    ) -> AppResult<Fine> {
        let fine = sqlx::query_as::<_, Fine>(
            r#"
            INSERT INTO fines (user_id, book_loan_id, amount, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_loan_id)
        .bind(amount)
        .bind(description)
        .fetch_one(&mut *conn)
        .await?;
        Ok(fine)
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<FineDetails>> {
        let query = format!("{} WHERE f.user_id = $1 ORDER BY f.created_at DESC, f.id DESC", DETAILS_SELECT);
        let fines = sqlx::query_as::<_, FineDetails>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(fines)
    }

    pub async fn list_all(&self) -> AppResult<Vec<FineDetails>> {
        let query = format!("{} ORDER BY f.created_at DESC, f.id DESC", DETAILS_SELECT);
        let fines = sqlx::query_as::<_, FineDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(fines)
    }

    /// Delete a fine; returns false when it did not exist
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM fines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
