//! Book (title) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book record. `rating` is maintained by the review service and only read here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Book with stock figures, for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub cover_url: Option<String>,
    pub rating: Option<f64>,
    pub total_copies: i64,
    pub available_copies: i64,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 500, message = "Title must be 1 to 500 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(url(message = "Invalid cover URL"))]
    pub cover_url: Option<String>,
    /// Copies to put in stock immediately (default 1)
    #[validate(range(min = 0, max = 1000, message = "initial_copies must be between 0 and 1000"))]
    pub initial_copies: Option<i32>,
}

/// Restock request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCopies {
    /// Number of new copies. Zero is accepted and changes nothing.
    #[validate(range(min = 0, max = 1000, message = "amount must be between 0 and 1000"))]
    pub amount: i32,
}

/// Catalog search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive title fragment
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl BookQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}
