//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        loan::{LoanDetails, LoanQuery, ReturnOutcome},
        user::Authority,
    },
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct LoansListResponse {
    pub loans: Vec<LoanDetails>,
    pub total: usize,
}

impl From<Vec<LoanDetails>> for LoansListResponse {
    fn from(loans: Vec<LoanDetails>) -> Self {
        Self {
            total: loans.len(),
            loans,
        }
    }
}

/// The caller's loan history
#[utoipa::path(
    get,
    path = "/loans/mine",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(LoanQuery),
    responses(
        (status = 200, description = "Caller's loans, newest first", body = LoansListResponse)
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<LoansListResponse>> {
    let loans = state
        .services
        .loans
        .get_my_loans(claims.user_id, query.status.as_deref())
        .await?;
    Ok(Json(loans.into()))
}

/// Every loan, newest first
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All loans", body = LoansListResponse),
        (status = 403, description = "Missing LOAN_READ authority")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<LoansListResponse>> {
    claims.require(Authority::LoanRead)?;

    let loans = state.services.loans.get_all_loans().await?;
    Ok(Json(loans.into()))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Book returned", body = ReturnOutcome),
        (status = 403, description = "Missing LOAN_RETURN authority"),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Loan already returned or closed", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReturnOutcome>> {
    claims.require(Authority::LoanReturn)?;

    let outcome = state.services.loans.return_book(id).await?;
    Ok(Json(outcome))
}
