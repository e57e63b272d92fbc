//! User notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Message sent to subscribers when a copy of `title` comes back
pub fn restock_message(title: &str) -> String {
    format!("Book '{}' is available again! Borrow it now.", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restock_message_names_title() {
        assert_eq!(
            restock_message("Dune"),
            "Book 'Dune' is available again! Borrow it now."
        );
    }
}
