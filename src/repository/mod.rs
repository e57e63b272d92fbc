//! Repository layer for database operations

pub mod books;
pub mod copies;
pub mod fines;
pub mod loans;
pub mod notifications;
pub mod requests;
pub mod subscriptions;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
    pub copies: copies::CopiesRepository,
    pub requests: requests::RequestsRepository,
    pub loans: loans::LoansRepository,
    pub fines: fines::FinesRepository,
    pub subscriptions: subscriptions::SubscriptionsRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            fines: fines::FinesRepository::new(pool.clone()),
            subscriptions: subscriptions::SubscriptionsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}
