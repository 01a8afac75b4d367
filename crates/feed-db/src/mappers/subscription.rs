//! Subscription entity <-> model mapper

use feed_core::entities::Subscription;
use feed_core::value_objects::EntityId;

use crate::models::SubscriptionModel;

impl From<SubscriptionModel> for Subscription {
    fn from(model: SubscriptionModel) -> Self {
        Subscription {
            id: EntityId::new(model.id),
            subscriber_id: EntityId::new(model.subscriber_id),
            subscribed_to_id: EntityId::new(model.subscribed_to_id),
            created_at: model.created_at,
        }
    }
}
