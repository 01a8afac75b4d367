//! # feed-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    CommentService, EngagementService, PostService, RecommendationService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SimilarityCache, SubscriptionService,
};
