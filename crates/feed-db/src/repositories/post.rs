//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use feed_core::entities::{NewPost, Post, PostChanges};
use feed_core::error::DomainError;
use feed_core::traits::{PostRepository, RepoResult};
use feed_core::value_objects::EntityId;

use crate::models::PostModel;

use super::error::{map_db_error, map_foreign_key_violation};

const POST_COLUMNS: &str = "id, author_id, title, description, like_count, dislike_count, \
                            view_count, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list_snapshot(&self) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: EntityId) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, author_ids), fields(count = author_ids.len()))]
    async fn find_by_authors(&self, author_ids: &[EntityId]) -> RepoResult<Vec<Post>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = author_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = ANY($1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "INSERT INTO posts (author_id, title, description) VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(post.author_id.into_inner())
        .bind(&post.title)
        .bind(&post.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| DomainError::UserNotFound(post.author_id)))?;

        Ok(Post::from(result))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: EntityId, changes: &PostChanges) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "UPDATE posts SET title = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(&changes.title)
        .bind(&changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Post::from).ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        // Reactions, comments and responses go with the post (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: EntityId) -> RepoResult<i64> {
        let views = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE posts SET view_count = view_count + 1
            WHERE id = $1
            RETURNING view_count
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        views.ok_or(DomainError::PostNotFound(id))
    }
}
