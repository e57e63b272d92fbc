//! Restock subscriptions repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::subscription::{Subscription, SubscriptionDetails},
};

#[derive(Clone)]
pub struct SubscriptionsRepository {
    pool: Pool<Postgres>,
}

impl SubscriptionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a subscription; `None` when the user is already subscribed
    pub async fn insert(&self, user_id: i32, book_id: i32) -> AppResult<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (user_id, book_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT uq_subscriptions_user_book DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subscription)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Subscription> {
        sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subscription with id {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<SubscriptionDetails>> {
        let subscriptions = sqlx::query_as::<_, SubscriptionDetails>(
            r#"
            SELECT s.id, s.book_id, b.title AS book_title, s.created_at
            FROM subscriptions s
            JOIN books b ON b.id = s.book_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions)
    }
}
