//! Catalog and inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{AddCopies, BookQuery, BookShort, CreateBook},
        copy::BookCopy,
        user::Authority,
    },
};

use super::AuthenticatedUser;

/// Paginated book search result
#[derive(Serialize, ToSchema)]
pub struct BooksListResponse {
    pub books: Vec<BookShort>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Serialize, ToSchema)]
pub struct CopiesAddedResponse {
    /// Number of copies created
    pub added: u64,
    /// Stock figures after the restock
    pub book: BookShort,
}

/// Search books by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = BooksListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BooksListResponse>> {
    let (books, total) = state.services.catalog.search_books(&query).await?;

    Ok(Json(BooksListResponse {
        books,
        total,
        page: query.page(),
        per_page: query.per_page(),
    }))
}

/// Get a book with its stock figures
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookShort),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookShort>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book with its initial copies
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookShort),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing BOOK_CREATE authority")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookShort>)> {
    claims.require(Authority::BookCreate)?;
    book.validate()?;

    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the copies of a book
#[utoipa::path(
    get,
    path = "/books/{id}/copies",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copies ordered by id", body = Vec<BookCopy>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_copies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<BookCopy>>> {
    let copies = state.services.inventory.list_copies(id).await?;
    Ok(Json(copies))
}

/// Restock a book
#[utoipa::path(
    post,
    path = "/books/{id}/copies",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = AddCopies,
    responses(
        (status = 200, description = "Copies added", body = CopiesAddedResponse),
        (status = 400, description = "Invalid amount"),
        (status = 403, description = "Missing BOOK_UPDATE authority"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn add_copies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(body): Json<AddCopies>,
) -> AppResult<Json<CopiesAddedResponse>> {
    claims.require(Authority::BookUpdate)?;
    body.validate()?;

    let added = state.services.inventory.add_copies(id, body.amount).await?;
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(CopiesAddedResponse { added, book }))
}
