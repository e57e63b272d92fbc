//! Fine model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Fine row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fine {
    pub id: i32,
    pub user_id: i32,
    pub book_loan_id: Option<i32>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fine with the fined user's name, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FineDetails {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub book_loan_id: Option<i32>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Manual fine issued by an administrator
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFine {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    pub amount: Decimal,
    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,
    /// Loan the fine relates to, if any
    pub book_loan_id: Option<i32>,
}
