//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    #[error("Post not found: {0}")]
    PostNotFound(EntityId),

    #[error("Comment not found: {0}")]
    CommentNotFound(EntityId),

    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(EntityId),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Unauthenticated")]
    Unauthenticated,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Users cannot subscribe to themselves")]
    SelfSubscription,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Authors cannot react to their own posts")]
    ForbiddenSelfReaction,

    #[error("Not post author")]
    NotPostAuthor,

    #[error("Not subscription owner")]
    NotSubscriptionOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User has already reacted with the same reaction")]
    DuplicateReaction,

    #[error("Already subscribed to this user")]
    DuplicateSubscription,

    // =========================================================================
    // Integrity Errors
    // =========================================================================
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::SubscriptionNotFound(_) => "UNKNOWN_SUBSCRIPTION",

            // Authentication
            Self::Unauthenticated => "UNAUTHENTICATED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",

            // Authorization
            Self::ForbiddenSelfReaction => "SELF_REACTION_FORBIDDEN",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotSubscriptionOwner => "NOT_SUBSCRIPTION_OWNER",

            // Conflict
            Self::DuplicateReaction => "DUPLICATE_REACTION",
            Self::DuplicateSubscription => "DUPLICATE_SUBSCRIPTION",

            // Integrity
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::SubscriptionNotFound(_)
        )
    }

    /// Check if the caller could not be authenticated
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ContentTooLong { .. } | Self::SelfSubscription
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::ForbiddenSelfReaction | Self::NotPostAuthor | Self::NotSubscriptionOwner
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateReaction | Self::DuplicateSubscription)
    }
}
