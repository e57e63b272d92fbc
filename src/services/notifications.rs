//! Notification inbox and restock fan-out

use sqlx::{Connection, PgConnection};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        notification::{restock_message, Notification},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Tell every subscriber of `book` that a copy is back.
    ///
    /// Runs in a savepoint of the caller's transaction. A failure is logged
    /// and rolled back to the savepoint; it never fails the caller.
    pub async fn notify_restock(&self, conn: &mut PgConnection, book: &Book) -> u64 {
        let message = restock_message(&book.title);

        let mut savepoint = match conn.begin().await {
            Ok(savepoint) => savepoint,
            Err(e) => {
                tracing::warn!("Could not open savepoint for book {} notifications: {}", book.id, e);
                return 0;
            }
        };

        match self
            .repository
            .notifications
            .fan_out(&mut savepoint, book.id, &message)
            .await
        {
            Ok(sent) => match savepoint.commit().await {
                Ok(()) => {
                    tracing::info!("Notified {} subscribers of book {}", sent, book.id);
                    sent
                }
                Err(e) => {
                    tracing::warn!("Failed to release notification savepoint for book {}: {}", book.id, e);
                    0
                }
            },
            Err(e) => {
                tracing::warn!("Failed to notify subscribers of book {}: {}", book.id, e);
                if let Err(e) = savepoint.rollback().await {
                    tracing::warn!("Failed to roll back notification savepoint: {}", e);
                }
                0
            }
        }
    }

    /// A user's notifications, newest first
    pub async fn get_my_notifications(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list_for_user(user_id).await
    }

    pub async fn count_unread(&self, user_id: i32) -> AppResult<i64> {
        self.repository.notifications.count_unread(user_id).await
    }

    pub async fn mark_as_read(&self, id: i32, user_id: i32) -> AppResult<Notification> {
        self.get_owned(id, user_id).await?;
        self.repository.notifications.mark_read(id).await
    }

    /// Idempotent: a second call changes nothing
    pub async fn mark_all_as_read(&self, user_id: i32) -> AppResult<u64> {
        self.repository.notifications.mark_all_read(user_id).await
    }

    pub async fn delete_notification(&self, id: i32, user_id: i32) -> AppResult<()> {
        self.get_owned(id, user_id).await?;
        self.repository.notifications.delete(id).await
    }

    pub async fn delete_all_notifications(&self, user_id: i32) -> AppResult<u64> {
        self.repository.notifications.delete_all(user_id).await
    }

    async fn get_owned(&self, id: i32, user_id: i32) -> AppResult<Notification> {
        let notification = self.repository.notifications.get_by_id(id).await?;
        if notification.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "Notification {} belongs to another user",
                id
            )));
        }
        Ok(notification)
    }
}
