//! Subscription database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for subscriptions table
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub id: i64,
    pub subscriber_id: i64,
    pub subscribed_to_id: i64,
    pub created_at: DateTime<Utc>,
}
