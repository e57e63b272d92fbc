//! Inventory ledger: per-book copy stock

use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::{book::Book, copy::BookCopy, enums::CopyStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Number of copies of a book that can be lent right now
    pub async fn count_available(&self, book_id: i32) -> AppResult<i64> {
        self.repository
            .copies
            .count_by_status(book_id, CopyStatus::Available)
            .await
    }

    /// Take the lowest-id available copy of `book` out of stock
    pub async fn allocate_copy(&self, conn: &mut PgConnection, book: &Book) -> AppResult<BookCopy> {
        let copy = self
            .repository
            .copies
            .allocate(conn, book.id)
            .await?
            .ok_or_else(|| {
                AppError::OutOfStock(format!("No copy of '{}' is available", book.title))
            })?;

        tracing::debug!("Allocated copy {} of book {}", copy.id, book.id);
        Ok(copy)
    }

    /// Put a copy back in stock
    pub async fn release_copy(&self, conn: &mut PgConnection, copy_id: i32) -> AppResult<()> {
        self.repository.copies.release(conn, copy_id).await
    }

    /// Restock a book with `count` new copies
    pub async fn add_copies(&self, book_id: i32, count: i32) -> AppResult<u64> {
        if count < 0 {
            return Err(AppError::Validation(
                "Number of copies cannot be negative".to_string(),
            ));
        }

        self.repository.books.get_by_id(book_id).await?;
        if count == 0 {
            return Ok(0);
        }

        let mut tx = self.repository.pool.begin().await?;
        let added = self.repository.copies.add(&mut tx, book_id, count).await?;
        tx.commit().await?;

        tracing::info!("Added {} copies to book {}", added, book_id);
        Ok(added)
    }

    /// Copies of a book ordered by id
    pub async fn list_copies(&self, book_id: i32) -> AppResult<Vec<BookCopy>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.copies.list_for_book(book_id).await
    }
}
