//! Restock subscriptions

use crate::{
    error::{AppError, AppResult},
    models::subscription::{Subscription, SubscriptionDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct SubscriptionsService {
    repository: Repository,
}

impl SubscriptionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn subscribe(&self, user_id: i32, book_id: i32) -> AppResult<Subscription> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.books.get_by_id(book_id).await?;

        let subscription = self
            .repository
            .subscriptions
            .insert(user_id, book_id)
            .await?
            .ok_or(AppError::AlreadySubscribed)?;

        tracing::info!("User {} subscribed to book {}", user_id, book_id);
        Ok(subscription)
    }

    pub async fn unsubscribe(&self, subscription_id: i32, user_id: i32) -> AppResult<()> {
        let subscription = self.repository.subscriptions.get_by_id(subscription_id).await?;
        if subscription.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "Subscription {} belongs to another user",
                subscription_id
            )));
        }

        self.repository.subscriptions.delete(subscription_id).await?;
        tracing::info!("User {} unsubscribed from book {}", user_id, subscription.book_id);
        Ok(())
    }

    pub async fn get_my_subscriptions(&self, user_id: i32) -> AppResult<Vec<SubscriptionDetails>> {
        self.repository.subscriptions.list_for_user(user_id).await
    }
}
