//! Borrow request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        request::{BookRequest, BookRequestDetails, CreateBorrowRequest},
        user::Authority,
    },
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct RequestsListResponse {
    pub requests: Vec<BookRequestDetails>,
    pub total: usize,
}

impl From<Vec<BookRequestDetails>> for RequestsListResponse {
    fn from(requests: Vec<BookRequestDetails>) -> Self {
        Self {
            total: requests.len(),
            requests,
        }
    }
}

/// Decision on a pending request
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ProcessRequestQuery {
    /// ACCEPTED or DENIED (case-insensitive)
    pub status: Option<String>,
}

/// Ask to borrow a book
#[utoipa::path(
    post,
    path = "/requests/borrow",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateBorrowRequest,
    responses(
        (status = 201, description = "Request filed", body = BookRequest),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Out of stock or already pending", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(body): Json<CreateBorrowRequest>,
) -> AppResult<(StatusCode, Json<BookRequest>)> {
    let request = state
        .services
        .requests
        .create_borrow_request(claims.user_id, body.book_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// The caller's requests, newest first
#[utoipa::path(
    get,
    path = "/requests/mine",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's requests", body = RequestsListResponse)
    )
)]
pub async fn my_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<RequestsListResponse>> {
    let requests = state.services.requests.get_my_requests(claims.user_id).await?;
    Ok(Json(requests.into()))
}

/// Cancel one of the caller's pending requests
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request cancelled"),
        (status = 403, description = "Request belongs to another user"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already processed")
    )
)]
pub async fn cancel_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.requests.cancel_request(id, claims.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// All requests, pending first
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All requests", body = RequestsListResponse),
        (status = 403, description = "Missing LOAN_READ authority")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<RequestsListResponse>> {
    claims.require(Authority::LoanRead)?;

    let requests = state.services.requests.get_all_requests().await?;
    Ok(Json(requests.into()))
}

/// Accept or deny a pending request
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ProcessRequestQuery
    ),
    responses(
        (status = 200, description = "Request processed", body = BookRequest),
        (status = 400, description = "Status is not ACCEPTED or DENIED"),
        (status = 403, description = "Missing LOAN_APPROVE authority"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already processed or out of stock", body = crate::error::ErrorResponse)
    )
)]
pub async fn process_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<ProcessRequestQuery>,
) -> AppResult<Json<BookRequest>> {
    claims.require(Authority::LoanApprove)?;

    let request = state
        .services
        .requests
        .process_request(id, query.status.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(request))
}
