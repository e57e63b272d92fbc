//! Book copy (lendable unit) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::CopyStatus;

/// Condition recorded for freshly stocked copies
pub const NEW_COPY_CONDITION: &str = "New";

/// One physical copy of a book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookCopy {
    pub id: i32,
    pub book_id: i32,
    pub status: CopyStatus,
    pub condition: String,
}
