//! Restock subscription model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Subscription row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subscription {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Subscription with the book title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubscriptionDetails {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub created_at: DateTime<Utc>,
}

/// Subscribe request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubscription {
    pub book_id: i32,
}
