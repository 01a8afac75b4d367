//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Locked counter row read at the start of a reaction transition
#[derive(Debug, Clone, FromRow)]
pub struct PostCountersModel {
    pub author_id: i64,
    pub like_count: i64,
    pub dislike_count: i64,
}
