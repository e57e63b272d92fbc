//! Notification inbox endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::notification::Notification};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct AffectedResponse {
    /// Number of notifications changed
    pub affected: u64,
}

/// The caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's notifications", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state
        .services
        .notifications
        .get_my_notifications(claims.user_id)
        .await?;
    Ok(Json(notifications))
}

#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread notifications", body = UnreadCountResponse)
    )
)]
pub async fn unread_count(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state.services.notifications.count_unread(claims.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = Notification),
        (status = 403, description = "Notification belongs to another user"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_as_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Notification>> {
    let notification = state
        .services
        .notifications
        .mark_as_read(id, claims.user_id)
        .await?;
    Ok(Json(notification))
}

#[utoipa::path(
    put,
    path = "/notifications/read-all",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All marked as read", body = AffectedResponse)
    )
)]
pub async fn mark_all_as_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AffectedResponse>> {
    let affected = state
        .services
        .notifications
        .mark_all_as_read(claims.user_id)
        .await?;
    Ok(Json(AffectedResponse { affected }))
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Notification belongs to another user"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn delete_notification(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .notifications
        .delete_notification(id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the caller's inbox
#[utoipa::path(
    delete,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inbox cleared", body = AffectedResponse)
    )
)]
pub async fn delete_all_notifications(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AffectedResponse>> {
    let affected = state
        .services
        .notifications
        .delete_all_notifications(claims.user_id)
        .await?;
    Ok(Json(AffectedResponse { affected }))
}
