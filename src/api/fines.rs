//! Fine endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        fine::{CreateFine, Fine, FineDetails},
        user::Authority,
    },
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct FinesListResponse {
    pub fines: Vec<FineDetails>,
    pub total: usize,
}

impl From<Vec<FineDetails>> for FinesListResponse {
    fn from(fines: Vec<FineDetails>) -> Self {
        Self {
            total: fines.len(),
            fines,
        }
    }
}

/// The caller's fines
#[utoipa::path(
    get,
    path = "/fines/mine",
    tag = "fines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's fines, newest first", body = FinesListResponse)
    )
)]
pub async fn my_fines(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FinesListResponse>> {
    let fines = state.services.fines.get_my_fines(claims.user_id).await?;
    Ok(Json(fines.into()))
}

/// All fines
#[utoipa::path(
    get,
    path = "/fines",
    tag = "fines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All fines, newest first", body = FinesListResponse),
        (status = 403, description = "Missing FINE_MANAGE authority")
    )
)]
pub async fn list_fines(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FinesListResponse>> {
    claims.require(Authority::FineManage)?;

    let fines = state.services.fines.get_all_fines().await?;
    Ok(Json(fines.into()))
}

/// Issue a fine by hand
#[utoipa::path(
    post,
    path = "/fines",
    tag = "fines",
    security(("bearer_auth" = [])),
    request_body = CreateFine,
    responses(
        (status = 201, description = "Fine issued", body = Fine),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing FINE_MANAGE authority"),
        (status = 404, description = "User or loan not found")
    )
)]
pub async fn create_fine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(body): Json<CreateFine>,
) -> AppResult<(StatusCode, Json<Fine>)> {
    claims.require(Authority::FineManage)?;
    body.validate()?;

    let fine = state.services.fines.create_fine(body).await?;
    Ok((StatusCode::CREATED, Json(fine)))
}

/// Settle (remove) a fine
#[utoipa::path(
    delete,
    path = "/fines/{id}",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Fine ID")),
    responses(
        (status = 204, description = "Fine settled"),
        (status = 403, description = "Missing FINE_MANAGE authority"),
        (status = 404, description = "Fine not found")
    )
)]
pub async fn delete_fine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Authority::FineManage)?;

    state.services.fines.delete_fine(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
