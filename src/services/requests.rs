//! Borrow-request workflow

use crate::{
    error::{AppError, AppResult},
    models::request::{BookRequest, BookRequestDetails, RequestDecision},
    repository::Repository,
};

use super::{inventory::InventoryService, loans::LoansService};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    inventory: InventoryService,
    loans: LoansService,
}

impl RequestsService {
    pub fn new(repository: Repository, inventory: InventoryService, loans: LoansService) -> Self {
        Self {
            repository,
            inventory,
            loans,
        }
    }

    /// File a PENDING borrow request. Stock is checked but not reserved.
    pub async fn create_borrow_request(&self, user_id: i32, book_id: i32) -> AppResult<BookRequest> {
        self.repository.users.get_by_id(user_id).await?;
        let book = self.repository.books.get_by_id(book_id).await?;

        if self.repository.requests.has_pending(user_id, book_id).await? {
            return Err(AppError::DuplicatePending);
        }

        if self.inventory.count_available(book_id).await? == 0 {
            return Err(AppError::OutOfStock(format!(
                "No copy of '{}' is available",
                book.title
            )));
        }

        let request = self
            .repository
            .requests
            .insert_pending(user_id, book_id)
            .await?
            .ok_or(AppError::DuplicatePending)?;

        tracing::info!("Borrow request {} filed by user {} for book {}", request.id, user_id, book_id);
        Ok(request)
    }

    /// Accept or deny a pending request.
    ///
    /// Accepting creates the loan in the same transaction; if no copy can be
    /// allocated the whole decision is rolled back and the request stays PENDING.
    pub async fn process_request(&self, request_id: i32, status: &str) -> AppResult<BookRequest> {
        let mut tx = self.repository.pool.begin().await?;

        let request = self
            .repository
            .requests
            .lock(&mut tx, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", request_id)))?;
        request.ensure_pending()?;

        let decision = RequestDecision::parse(status)?;
        let loan_id = match decision {
            RequestDecision::Deny => None,
            RequestDecision::Accept => {
                let book = self.repository.books.get_by_id(request.book_id).await?;
                let loan = self
                    .loans
                    .create_loan_from_request(&mut tx, request.user_id, &book)
                    .await?;
                Some(loan.id)
            }
        };

        let updated = self
            .repository
            .requests
            .set_status(&mut tx, request.id, decision.status(), loan_id)
            .await?;
        tx.commit().await?;

        tracing::info!("Request {} {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Withdraw one of the caller's own pending requests
    pub async fn cancel_request(&self, request_id: i32, user_id: i32) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;

        let request = self
            .repository
            .requests
            .lock(&mut tx, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", request_id)))?;
        request.ensure_owned_by(user_id)?;
        request.ensure_pending()?;

        self.repository.requests.delete(&mut tx, request.id).await?;
        tx.commit().await?;

        tracing::info!("Request {} cancelled by user {}", request_id, user_id);
        Ok(())
    }

    pub async fn get_my_requests(&self, user_id: i32) -> AppResult<Vec<BookRequestDetails>> {
        self.repository.requests.list_for_user(user_id).await
    }

    /// All requests, PENDING first
    pub async fn get_all_requests(&self) -> AppResult<Vec<BookRequestDetails>> {
        self.repository.requests.list_all().await
    }
}
