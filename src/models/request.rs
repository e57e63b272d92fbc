//! Borrow request model and state transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{RequestStatus, RequestType};
use crate::error::{AppError, AppResult};

/// Borrow request row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRequest {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub book_loan_id: Option<i32>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookRequest {
    /// Only PENDING requests may be decided or cancelled
    pub fn ensure_pending(&self) -> AppResult<()> {
        match self.status {
            RequestStatus::Pending => Ok(()),
            RequestStatus::Accepted | RequestStatus::Denied => Err(AppError::AlreadyProcessed(
                format!("Request {} has already been {}", self.id, self.status),
            )),
        }
    }

    pub fn ensure_owned_by(&self, user_id: i32) -> AppResult<()> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Request {} belongs to another user",
                self.id
            )))
        }
    }
}

/// Request joined with book title and requester, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRequestDetails {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub book_id: i32,
    pub book_title: String,
    pub book_loan_id: Option<i32>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create borrow request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrowRequest {
    pub book_id: i32,
}

/// Administrator decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Accept,
    Deny,
}

impl RequestDecision {
    /// Decode a submitted status. Only ACCEPTED and DENIED are decisions.
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.parse::<RequestStatus>()? {
            RequestStatus::Accepted => Ok(RequestDecision::Accept),
            RequestStatus::Denied => Ok(RequestDecision::Deny),
            RequestStatus::Pending => Err(AppError::InvalidStatus(
                "A request can only be ACCEPTED or DENIED".to_string(),
            )),
        }
    }

    pub fn status(&self) -> RequestStatus {
        match self {
            RequestDecision::Accept => RequestStatus::Accepted,
            RequestDecision::Deny => RequestStatus::Denied,
        }
    }
}
