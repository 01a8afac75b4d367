//! Subscription service
//!
//! Users follow other users; the followed authors' posts make up the
//! subscriber's feed (see [`PostService::list_subscribed_posts`]).
//!
//! [`PostService::list_subscribed_posts`]: super::post::PostService::list_subscribed_posts

use std::collections::HashMap;

use feed_core::entities::{NewSubscription, Subscription, User};
use feed_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{SubscribeRequest, SubscriptionResponse, SubscriptionWithUsers};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow `request.subscribed_to_id`
    #[instrument(skip(self, request), fields(subscribed_to_id = %request.subscribed_to_id))]
    pub async fn subscribe(
        &self,
        subscriber_id: EntityId,
        request: SubscribeRequest,
    ) -> ServiceResult<SubscriptionResponse> {
        let new = NewSubscription {
            subscriber_id,
            subscribed_to_id: request.subscribed_to_id,
        };
        if new.is_self() {
            return Err(DomainError::SelfSubscription.into());
        }

        let subscriber = self.find_user(subscriber_id).await?;
        let subscribed_to = self.find_user(request.subscribed_to_id).await?;

        let subscription = self.ctx.subscription_repo().create(&new).await?;

        info!(
            subscription_id = %subscription.id,
            subscriber_id = %subscriber_id,
            "Subscription created"
        );

        Ok(SubscriptionResponse::from(SubscriptionWithUsers {
            subscription,
            subscriber: &subscriber,
            subscribed_to: &subscribed_to,
        }))
    }

    /// Users that `user_id` follows
    #[instrument(skip(self))]
    pub async fn list_subscriptions(
        &self,
        user_id: EntityId,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        self.find_user(user_id).await?;
        let subscriptions = self.ctx.subscription_repo().find_by_subscriber(user_id).await?;
        self.describe(subscriptions).await
    }

    /// Users following `user_id`
    #[instrument(skip(self))]
    pub async fn list_subscribers(
        &self,
        user_id: EntityId,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        self.find_user(user_id).await?;
        let subscriptions = self.ctx.subscription_repo().find_by_target(user_id).await?;
        self.describe(subscriptions).await
    }

    /// Stop following (subscriber only)
    #[instrument(skip(self))]
    pub async fn unsubscribe(
        &self,
        actor_id: EntityId,
        subscription_id: EntityId,
    ) -> ServiceResult<()> {
        let subscription = self
            .ctx
            .subscription_repo()
            .find_by_id(subscription_id)
            .await?
            .ok_or(DomainError::SubscriptionNotFound(subscription_id))?;
        if !subscription.is_owned_by(actor_id) {
            return Err(DomainError::NotSubscriptionOwner.into());
        }

        self.ctx.subscription_repo().delete(subscription_id).await?;

        info!(subscription_id = %subscription_id, "Subscription deleted");
        Ok(())
    }

    async fn find_user(&self, user_id: EntityId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    async fn describe(
        &self,
        subscriptions: Vec<Subscription>,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        let mut user_ids: Vec<EntityId> = subscriptions
            .iter()
            .flat_map(|s| [s.subscriber_id, s.subscribed_to_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<EntityId, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        let lookup = |id: EntityId, subscription: EntityId| {
            users.get(&id).ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "subscription {subscription} references missing user {id}"
                ))
            })
        };

        subscriptions
            .into_iter()
            .map(|subscription| -> ServiceResult<SubscriptionResponse> {
                let subscriber = lookup(subscription.subscriber_id, subscription.id)?;
                let subscribed_to = lookup(subscription.subscribed_to_id, subscription.id)?;
                Ok(SubscriptionResponse::from(SubscriptionWithUsers {
                    subscription,
                    subscriber,
                    subscribed_to,
                }))
            })
            .collect()
    }
}
