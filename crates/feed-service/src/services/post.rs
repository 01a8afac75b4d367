//! Post service
//!
//! Handles post creation, editing, deletion, and feed queries. Every change
//! to the post corpus invalidates the similarity cache.

use std::collections::HashMap;

use feed_core::entities::{NewPost, Post, PostChanges, User};
use feed_core::{DomainError, EntityId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePostRequest, PostSummary, PostWithDetails, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new post with zeroed counters
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: EntityId,
        request: CreatePostRequest,
    ) -> ServiceResult<PostSummary> {
        request.validate()?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::UserNotFound(author_id))?;

        let post = self
            .ctx
            .post_repo()
            .create(&NewPost {
                author_id,
                title: request.title,
                description: request.description,
            })
            .await?;
        self.ctx.similarity_cache().invalidate();

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostSummary::from(PostWithDetails {
            post,
            author: &author,
            comments: 0,
        }))
    }

    /// Fetch one post, counting the read as a view
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: EntityId) -> ServiceResult<PostSummary> {
        self.ctx.post_repo().increment_views(post_id).await?;

        let post = self.find_post(post_id).await?;
        let mut summaries = self.summarize(vec![post]).await?;
        summaries.pop().ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    /// Every post, newest first
    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> ServiceResult<Vec<PostSummary>> {
        let posts = self.ctx.post_repo().list_recent().await?;
        self.summarize(posts).await
    }

    /// Posts of one author, newest first
    #[instrument(skip(self))]
    pub async fn list_user_posts(&self, author_id: EntityId) -> ServiceResult<Vec<PostSummary>> {
        let posts = self.ctx.post_repo().find_by_author(author_id).await?;
        self.summarize(posts).await
    }

    /// Posts by every author `subscriber_id` follows, newest first
    #[instrument(skip(self))]
    pub async fn list_subscribed_posts(
        &self,
        subscriber_id: EntityId,
    ) -> ServiceResult<Vec<PostSummary>> {
        let authors: Vec<EntityId> = self
            .ctx
            .subscription_repo()
            .find_by_subscriber(subscriber_id)
            .await?
            .into_iter()
            .map(|s| s.subscribed_to_id)
            .collect();
        let posts = self.ctx.post_repo().find_by_authors(&authors).await?;
        self.summarize(posts).await
    }

    /// Replace title and description (author only)
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        actor_id: EntityId,
        post_id: EntityId,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostSummary> {
        request.validate()?;

        let post = self.find_post(post_id).await?;
        if !post.is_author(actor_id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        let updated = self
            .ctx
            .post_repo()
            .update(
                post_id,
                &PostChanges {
                    title: request.title,
                    description: request.description,
                },
            )
            .await?;
        self.ctx.similarity_cache().invalidate();

        info!(post_id = %post_id, "Post updated");

        let mut summaries = self.summarize(vec![updated]).await?;
        summaries.pop().ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    /// Delete a post with its reactions and comment thread (author only)
    #[instrument(skip(self))]
    pub async fn delete_post(&self, actor_id: EntityId, post_id: EntityId) -> ServiceResult<()> {
        let post = self.find_post(post_id).await?;
        if !post.is_author(actor_id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        self.ctx.post_repo().delete(post_id).await?;
        self.ctx.similarity_cache().invalidate();

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    async fn find_post(&self, post_id: EntityId) -> ServiceResult<Post> {
        Ok(self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?)
    }

    /// Attach author details and thread sizes, keeping the input order
    pub(crate) async fn summarize(&self, posts: Vec<Post>) -> ServiceResult<Vec<PostSummary>> {
        let mut author_ids: Vec<EntityId> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<EntityId, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let mut summaries = Vec::with_capacity(posts.len());
        for post in posts {
            let author = authors.get(&post.author_id).ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "post {} references missing author {}",
                    post.id, post.author_id
                ))
            })?;
            let comments = self.ctx.comment_repo().count_thread(post.id).await?;
            summaries.push(PostSummary::from(PostWithDetails {
                post,
                author,
                comments,
            }));
        }
        Ok(summaries)
    }
}
