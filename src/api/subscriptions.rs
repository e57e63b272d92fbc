//! Restock subscription endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::subscription::{CreateSubscription, Subscription, SubscriptionDetails},
};

use super::AuthenticatedUser;

/// Get notified when a book is back in stock
#[utoipa::path(
    post,
    path = "/subscriptions",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    request_body = CreateSubscription,
    responses(
        (status = 201, description = "Subscribed", body = Subscription),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Already subscribed", body = crate::error::ErrorResponse)
    )
)]
pub async fn subscribe(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(body): Json<CreateSubscription>,
) -> AppResult<(StatusCode, Json<Subscription>)> {
    let subscription = state
        .services
        .subscriptions
        .subscribe(claims.user_id, body.book_id)
        .await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// The caller's subscriptions
#[utoipa::path(
    get,
    path = "/subscriptions/mine",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's subscriptions, newest first", body = Vec<SubscriptionDetails>)
    )
)]
pub async fn my_subscriptions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SubscriptionDetails>>> {
    let subscriptions = state
        .services
        .subscriptions
        .get_my_subscriptions(claims.user_id)
        .await?;
    Ok(Json(subscriptions))
}

/// Stop a subscription
#[utoipa::path(
    delete,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 403, description = "Subscription belongs to another user"),
        (status = 404, description = "Subscription not found")
    )
)]
pub async fn unsubscribe(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.subscriptions.unsubscribe(id, claims.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
