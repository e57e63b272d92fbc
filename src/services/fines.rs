//! Fine administration

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::fine::{CreateFine, Fine, FineDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct FinesService {
    repository: Repository,
}

impl FinesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_my_fines(&self, user_id: i32) -> AppResult<Vec<FineDetails>> {
        self.repository.fines.list_for_user(user_id).await
    }

    pub async fn get_all_fines(&self) -> AppResult<Vec<FineDetails>> {
        self.repository.fines.list_all().await
    }

    /// Issue a fine by hand
    pub async fn create_fine(&self, fine: CreateFine) -> AppResult<Fine> {
        if fine.amount <= Decimal::ZERO {
            return Err(AppError::Validation("Fine amount must be positive".to_string()));
        }

        let user = self.repository.users.get_by_username(&fine.username).await?;
        if let Some(loan_id) = fine.book_loan_id {
            let loan = self.repository.loans.get_by_id(loan_id).await?;
            if loan.user_id != user.id {
                return Err(AppError::Validation(format!(
                    "Loan {} does not belong to {}",
                    loan_id, user.username
                )));
            }
        }

        let mut conn = self.repository.pool.acquire().await?;
        let created = self
            .repository
            .fines
            .insert(
                &mut conn,
                user.id,
                fine.book_loan_id,
                fine.amount,
                fine.description.as_deref(),
            )
            .await?;

        tracing::info!("Fine {} of {} issued to {}", created.id, created.amount, user.username);
        Ok(created)
    }

    /// Settle a fine by removing it
    pub async fn delete_fine(&self, id: i32) -> AppResult<()> {
        if !self.repository.fines.delete(id).await? {
            return Err(AppError::NotFound(format!("Fine with id {} not found", id)));
        }
        tracing::info!("Fine {} settled", id);
        Ok(())
    }
}
