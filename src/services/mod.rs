//! Business logic services

pub mod catalog;
pub mod dashboard;
pub mod fines;
pub mod inventory;
pub mod loans;
pub mod notifications;
pub mod requests;
pub mod subscriptions;

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::loan::LoanPolicy, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub inventory: inventory::InventoryService,
    pub requests: requests::RequestsService,
    pub loans: loans::LoansService,
    pub fines: fines::FinesService,
    pub subscriptions: subscriptions::SubscriptionsService,
    pub notifications: notifications::NotificationsService,
    pub dashboard: dashboard::DashboardService,
    pool: Pool<Postgres>,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, policy: LoanPolicy) -> Self {
        let inventory = inventory::InventoryService::new(repository.clone());
        let notifications = notifications::NotificationsService::new(repository.clone());
        let loans = loans::LoansService::new(
            repository.clone(),
            inventory.clone(),
            notifications.clone(),
            policy,
        );

        Self {
            pool: repository.pool.clone(),
            catalog: catalog::CatalogService::new(repository.clone()),
            requests: requests::RequestsService::new(
                repository.clone(),
                inventory.clone(),
                loans.clone(),
            ),
            fines: fines::FinesService::new(repository.clone()),
            subscriptions: subscriptions::SubscriptionsService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository),
            inventory,
            loans,
            notifications,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
