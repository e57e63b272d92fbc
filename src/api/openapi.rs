//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    books, dashboard, fines, health, loans, notifications, requests, subscriptions,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library circulation REST API: inventory, borrow requests, loans, fines and restock notifications",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::list_copies,
        books::add_copies,
        // Requests
        requests::create_borrow_request,
        requests::my_requests,
        requests::cancel_request,
        requests::list_requests,
        requests::process_request,
        // Loans
        loans::my_loans,
        loans::list_loans,
        loans::return_book,
        // Fines
        fines::my_fines,
        fines::list_fines,
        fines::create_fine,
        fines::delete_fine,
        // Subscriptions
        subscriptions::subscribe,
        subscriptions::my_subscriptions,
        subscriptions::unsubscribe,
        // Notifications
        notifications::list_notifications,
        notifications::unread_count,
        notifications::mark_as_read,
        notifications::mark_all_as_read,
        notifications::delete_notification,
        notifications::delete_all_notifications,
        // Dashboard
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::AddCopies,
            crate::models::copy::BookCopy,
            crate::models::enums::CopyStatus,
            books::BooksListResponse,
            books::CopiesAddedResponse,
            // Requests
            crate::models::request::BookRequest,
            crate::models::request::BookRequestDetails,
            crate::models::request::CreateBorrowRequest,
            crate::models::enums::RequestType,
            crate::models::enums::RequestStatus,
            requests::RequestsListResponse,
            // Loans
            crate::models::loan::BookLoan,
            crate::models::loan::LoanDetails,
            crate::models::enums::LoanStatus,
            crate::models::loan::ReturnOutcome,
            loans::LoansListResponse,
            // Fines
            crate::models::fine::Fine,
            crate::models::fine::FineDetails,
            crate::models::fine::CreateFine,
            fines::FinesListResponse,
            // Subscriptions
            crate::models::subscription::Subscription,
            crate::models::subscription::SubscriptionDetails,
            crate::models::subscription::CreateSubscription,
            // Notifications
            crate::models::notification::Notification,
            notifications::UnreadCountResponse,
            notifications::AffectedResponse,
            // Dashboard
            crate::models::dashboard::DashboardResponse,
            crate::models::dashboard::ChartEntry,
            crate::models::dashboard::TrendingBook,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog and copy stock"),
        (name = "requests", description = "Borrow request workflow"),
        (name = "loans", description = "Loans and returns"),
        (name = "fines", description = "Fine administration"),
        (name = "subscriptions", description = "Restock subscriptions"),
        (name = "notifications", description = "Notification inbox"),
        (name = "dashboard", description = "Administrator dashboard")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` JWT scheme referenced by the paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
