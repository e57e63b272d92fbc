//! Catalog service: books and their stock figures

use crate::{
    error::AppResult,
    models::book::{BookQuery, BookShort, CreateBook},
    repository::Repository,
};

/// Copies stocked with a new book when the request does not say
const DEFAULT_INITIAL_COPIES: i32 = 1;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book together with its initial copies
    pub async fn create_book(&self, book: CreateBook) -> AppResult<BookShort> {
        let initial_copies = book.initial_copies.unwrap_or(DEFAULT_INITIAL_COPIES);

        let mut tx = self.repository.pool.begin().await?;
        let created = self.repository.books.create(&mut tx, &book).await?;
        self.repository
            .copies
            .add(&mut tx, created.id, initial_copies)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Created book {} '{}' with {} copies",
            created.id,
            created.title,
            initial_copies
        );
        self.repository.books.get_short(created.id).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookShort> {
        self.repository.books.get_short(id).await
    }

    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.search(query).await
    }
}
