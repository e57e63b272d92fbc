//! API handlers for Libris REST endpoints

pub mod books;
pub mod dashboard;
pub mod fines;
pub mod health;
pub mod loans;
pub mod notifications;
pub mod openapi;
pub mod requests;
pub mod subscriptions;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog and inventory
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/copies", get(books::list_copies).post(books::add_copies))
        // Borrow requests
        .route("/requests", get(requests::list_requests))
        .route("/requests/borrow", post(requests::create_borrow_request))
        .route("/requests/mine", get(requests::my_requests))
        .route(
            "/requests/:id",
            put(requests::process_request).delete(requests::cancel_request),
        )
        // Loans
        .route("/loans", get(loans::list_loans))
        .route("/loans/mine", get(loans::my_loans))
        .route("/loans/:id/return", put(loans::return_book))
        // Fines
        .route("/fines", get(fines::list_fines).post(fines::create_fine))
        .route("/fines/mine", get(fines::my_fines))
        .route("/fines/:id", delete(fines::delete_fine))
        // Subscriptions
        .route("/subscriptions", post(subscriptions::subscribe))
        .route("/subscriptions/mine", get(subscriptions::my_subscriptions))
        .route("/subscriptions/:id", delete(subscriptions::unsubscribe))
        // Notifications
        .route(
            "/notifications",
            get(notifications::list_notifications).delete(notifications::delete_all_notifications),
        )
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", put(notifications::mark_all_as_read))
        .route("/notifications/:id/read", put(notifications::mark_as_read))
        .route("/notifications/:id", delete(notifications::delete_notification))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
