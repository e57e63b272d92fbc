//! Loan management service: loan creation, returns and overdue fines

use chrono::Utc;
use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{loan_status_filter, BookLoan, LoanDetails, LoanPolicy, ReturnOutcome},
    },
    repository::Repository,
};

use super::{inventory::InventoryService, notifications::NotificationsService};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    inventory: InventoryService,
    notifications: NotificationsService,
    policy: LoanPolicy,
}

impl LoansService {
    pub fn new(
        repository: Repository,
        inventory: InventoryService,
        notifications: NotificationsService,
        policy: LoanPolicy,
    ) -> Self {
        Self {
            repository,
            inventory,
            notifications,
            policy,
        }
    }

    /// Lend a copy of `book` to `user_id`, inside the caller's transaction.
    /// Fails with `OutOfStock` when no copy is available.
    pub async fn create_loan_from_request(
        &self,
        conn: &mut PgConnection,
        user_id: i32,
        book: &Book,
    ) -> AppResult<BookLoan> {
        let copy = self.inventory.allocate_copy(conn, book).await?;

        let loan_date = Utc::now();
        let due_date = self.policy.due_date(loan_date);
        let loan = self
            .repository
            .loans
            .insert(conn, user_id, copy.id, loan_date, due_date)
            .await?;

        tracing::info!(
            "Loan {} created: copy {} of book {} to user {}, due {}",
            loan.id,
            copy.id,
            book.id,
            user_id,
            due_date
        );
        Ok(loan)
    }

    /// Return a borrowed book.
    ///
    /// Marks the loan returned, puts the copy back in stock, fines late
    /// returns and notifies subscribers, all in one transaction.
    pub async fn return_book(&self, loan_id: i32) -> AppResult<ReturnOutcome> {
        let mut tx = self.repository.pool.begin().await?;

        let loan = self
            .repository
            .loans
            .lock(&mut tx, loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;
        loan.ensure_returnable()?;

        let return_date = Utc::now();
        let returned = self
            .repository
            .loans
            .mark_returned(&mut tx, loan.id, return_date)
            .await?;
        self.inventory.release_copy(&mut tx, loan.book_copy_id).await?;

        let fine = match self.policy.overdue_fine(loan.due_date, return_date) {
            Some(overdue) => {
                let fine = self
                    .repository
                    .fines
                    .insert(
                        &mut tx,
                        loan.user_id,
                        Some(loan.id),
                        overdue.amount,
                        Some(overdue.description.as_str()),
                    )
                    .await?;
                tracing::info!(
                    "Loan {} returned {} day(s) late, fined {}",
                    loan.id,
                    overdue.days,
                    overdue.amount
                );
                Some(fine)
            }
            None => None,
        };

        let book = self
            .repository
            .books
            .get_by_copy(&mut tx, loan.book_copy_id)
            .await?;
        let notified = self.notifications.notify_restock(&mut tx, &book).await;

        tx.commit().await?;

        tracing::info!("Loan {} returned, copy {} back in stock", loan.id, loan.book_copy_id);
        Ok(ReturnOutcome {
            loan: returned,
            fine,
            notified,
        })
    }

    /// A user's loan history. See [`loan_status_filter`] for how `status` is read.
    pub async fn get_my_loans(&self, user_id: i32, status: Option<&str>) -> AppResult<Vec<LoanDetails>> {
        let filter = loan_status_filter(status);
        self.repository.loans.list_for_user(user_id, filter).await
    }

    pub async fn get_all_loans(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_all().await
    }
}
