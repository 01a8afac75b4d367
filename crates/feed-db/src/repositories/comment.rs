//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use feed_core::entities::{Comment, CommentResponse, NewComment, NewCommentResponse};
use feed_core::error::DomainError;
use feed_core::traits::{CommentRepository, RepoResult};
use feed_core::value_objects::EntityId;

use crate::models::{CommentModel, CommentResponseModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, text, created_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: EntityId) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, text, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_responses_by_post(&self, post_id: EntityId) -> RepoResult<Vec<CommentResponse>> {
        let results = sqlx::query_as::<_, CommentResponseModel>(
            r"
            SELECT r.id, r.comment_id, r.author_id, r.text, r.created_at
            FROM comment_responses r
            INNER JOIN comments c ON c.id = r.comment_id
            WHERE c.post_id = $1
            ORDER BY r.created_at, r.id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CommentResponse::from).collect())
    }

    #[instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (post_id, author_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_id, text, created_at
            ",
        )
        .bind(comment.post_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some("comments_author_id_fkey") => DomainError::UserNotFound(comment.author_id),
                _ => DomainError::PostNotFound(comment.post_id),
            })
        })?;

        Ok(Comment::from(result))
    }

    #[instrument(skip(self, response), fields(comment_id = %response.comment_id))]
    async fn create_response(&self, response: &NewCommentResponse) -> RepoResult<CommentResponse> {
        let result = sqlx::query_as::<_, CommentResponseModel>(
            r"
            INSERT INTO comment_responses (comment_id, author_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, comment_id, author_id, text, created_at
            ",
        )
        .bind(response.comment_id.into_inner())
        .bind(response.author_id.into_inner())
        .bind(&response.text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some("comment_responses_author_id_fkey") => {
                    DomainError::UserNotFound(response.author_id)
                }
                _ => DomainError::CommentNotFound(response.comment_id),
            })
        })?;

        Ok(CommentResponse::from(result))
    }

    #[instrument(skip(self))]
    async fn count_thread(&self, post_id: EntityId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT
                (SELECT COUNT(*) FROM comments WHERE post_id = $1)
              + (SELECT COUNT(*)
                   FROM comment_responses r
                   INNER JOIN comments c ON c.id = r.comment_id
                  WHERE c.post_id = $1)
            ",
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
