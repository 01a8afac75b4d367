//! Comment service
//!
//! Handles the two-level comment thread of a post.

use std::collections::HashMap;

use feed_core::entities::{NewComment, NewCommentResponse, User};
use feed_core::{DomainError, EntityId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    comment_thread, reply_response, CommentThreadResponse, CreateCommentRequest, ReplyResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        author_id: EntityId,
        post_id: EntityId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentThreadResponse> {
        request.validate()?;

        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        let author = self.find_user(author_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                post_id,
                author_id,
                text: request.text,
            })
            .await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        Ok(comment_thread(comment, &author.username, Vec::new()))
    }

    /// Reply to a comment
    #[instrument(skip(self, request))]
    pub async fn create_comment_response(
        &self,
        author_id: EntityId,
        comment_id: EntityId,
        request: CreateCommentRequest,
    ) -> ServiceResult<ReplyResponse> {
        request.validate()?;

        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        let author = self.find_user(author_id).await?;

        let reply = self
            .ctx
            .comment_repo()
            .create_response(&NewCommentResponse {
                comment_id,
                author_id,
                text: request.text,
            })
            .await?;

        info!(response_id = %reply.id, comment_id = %comment_id, "Comment response created");

        Ok(reply_response(reply, &author.username))
    }

    /// Comments of a post, oldest first, each with its responses
    #[instrument(skip(self))]
    pub async fn list_comments(&self, post_id: EntityId) -> ServiceResult<Vec<CommentThreadResponse>> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;
        let responses = self.ctx.comment_repo().find_responses_by_post(post_id).await?;

        let mut author_ids: Vec<EntityId> = comments
            .iter()
            .map(|c| c.author_id)
            .chain(responses.iter().map(|r| r.author_id))
            .collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let usernames: HashMap<EntityId, String> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();
        let username = |id: EntityId| usernames.get(&id).map_or("", String::as_str);

        let mut replies: HashMap<EntityId, Vec<ReplyResponse>> = HashMap::new();
        for reply in responses {
            let name = username(reply.author_id);
            replies
                .entry(reply.comment_id)
                .or_default()
                .push(reply_response(reply, name));
        }

        Ok(comments
            .into_iter()
            .map(|comment| {
                let thread = replies.remove(&comment.id).unwrap_or_default();
                let name = username(comment.author_id);
                comment_thread(comment, name, thread)
            })
            .collect())
    }

    async fn find_user(&self, user_id: EntityId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}
