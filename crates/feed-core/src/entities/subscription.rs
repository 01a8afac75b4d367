//! Subscription entity - one user following another

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// `subscriber_id` follows the posts of `subscribed_to_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: EntityId,
    pub subscriber_id: EntityId,
    pub subscribed_to_id: EntityId,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn is_owned_by(&self, user_id: EntityId) -> bool {
        self.subscriber_id == user_id
    }
}

/// Values required to insert a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSubscription {
    pub subscriber_id: EntityId,
    pub subscribed_to_id: EntityId,
}

impl NewSubscription {
    /// Users cannot follow themselves
    pub fn is_self(&self) -> bool {
        self.subscriber_id == self.subscribed_to_id
    }
}
