//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::{Error as SqlxError, PgPool};
use tracing::instrument;

use feed_core::entities::{NewSubscription, Subscription};
use feed_core::error::DomainError;
use feed_core::traits::{RepoResult, SubscriptionRepository};
use feed_core::value_objects::EntityId;

use crate::models::SubscriptionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate constraint violations on insert into domain errors
fn map_insert_error(e: SqlxError, subscription: &NewSubscription) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::DuplicateSubscription;
        }
        if db_err.is_check_violation() {
            return DomainError::SelfSubscription;
        }
        if db_err.is_foreign_key_violation() {
            return match db_err.constraint() {
                Some("subscriptions_subscriber_id_fkey") => {
                    DomainError::UserNotFound(subscription.subscriber_id)
                }
                _ => DomainError::UserNotFound(subscription.subscribed_to_id),
            };
        }
    }
    map_db_error(e)
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Subscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT id, subscriber_id, subscribed_to_id, created_at
            FROM subscriptions
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Subscription::from))
    }

    #[instrument(skip(self))]
    async fn find_by_subscriber(&self, subscriber_id: EntityId) -> RepoResult<Vec<Subscription>> {
        let results = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT id, subscriber_id, subscribed_to_id, created_at
            FROM subscriptions
            WHERE subscriber_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(subscriber_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Subscription::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_target(&self, user_id: EntityId) -> RepoResult<Vec<Subscription>> {
        let results = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT id, subscriber_id, subscribed_to_id, created_at
            FROM subscriptions
            WHERE subscribed_to_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Subscription::from).collect())
    }

    #[instrument(skip(self, subscription), fields(
        subscriber_id = %subscription.subscriber_id,
        subscribed_to_id = %subscription.subscribed_to_id,
    ))]
    async fn create(&self, subscription: &NewSubscription) -> RepoResult<Subscription> {
        let result = sqlx::query_as::<_, SubscriptionModel>(
            r"
            INSERT INTO subscriptions (subscriber_id, subscribed_to_id)
            VALUES ($1, $2)
            RETURNING id, subscriber_id, subscribed_to_id, created_at
            ",
        )
        .bind(subscription.subscriber_id.into_inner())
        .bind(subscription.subscribed_to_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, subscription))?;

        Ok(Subscription::from(result))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SubscriptionNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSubscriptionRepository>();
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let new = NewSubscription {
            subscriber_id: EntityId::new(1),
            subscribed_to_id: EntityId::new(2),
        };
        let err = map_insert_error(SqlxError::RowNotFound, &new);
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
