//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use feed_core::engagement::{ReactionResult, ReactionTransition};
use feed_core::entities::Reaction;
use feed_core::error::DomainError;
use feed_core::traits::{ReactionRepository, RepoResult};
use feed_core::value_objects::{EntityId, ReactionKind};

use crate::mappers::parse_stored_kind;
use crate::models::{PostCountersModel, ReactionModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: EntityId, user_id: EntityId) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT post_id, user_id, kind, created_at, updated_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: EntityId) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT post_id, user_id, kind, created_at, updated_at
            FROM reactions
            WHERE post_id = $1
            ORDER BY created_at, user_id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn apply_transition(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        requested: ReactionKind,
    ) -> RepoResult<ReactionResult> {
        // Dropping `tx` without commit rolls everything back
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes every transition on this post
        let post = sqlx::query_as::<_, PostCountersModel>(
            r"
            SELECT author_id, like_count, dislike_count
            FROM posts
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(post_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::PostNotFound(post_id))?;

        let existing = sqlx::query_scalar::<_, String>(
            r"
            SELECT kind FROM reactions WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(|kind| parse_stored_kind(&kind))
        .transpose()?;

        let transition = ReactionTransition::plan(
            existing,
            requested,
            post.author_id == user_id.into_inner(),
        )?;
        let counts = transition.counter_delta().apply(post.counts())?;

        match transition {
            ReactionTransition::Create(kind) => {
                sqlx::query(
                    r"
                    INSERT INTO reactions (post_id, user_id, kind)
                    VALUES ($1, $2, $3)
                    ",
                )
                .bind(post_id.into_inner())
                .bind(user_id.into_inner())
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    let is_fk = e
                        .as_database_error()
                        .is_some_and(|db| db.is_foreign_key_violation());
                    if is_fk {
                        map_foreign_key_violation(e, |_| DomainError::UserNotFound(user_id))
                    } else {
                        map_unique_violation(e, || {
                            DomainError::InvariantViolation(format!(
                                "second reaction row for post {post_id} user {user_id}"
                            ))
                        })
                    }
                })?;
            }
            ReactionTransition::Change { to, .. } => {
                sqlx::query(
                    r"
                    UPDATE reactions SET kind = $3, updated_at = NOW()
                    WHERE post_id = $1 AND user_id = $2
                    ",
                )
                .bind(post_id.into_inner())
                .bind(user_id.into_inner())
                .bind(to.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        sqlx::query(
            r"
            UPDATE posts SET like_count = $2, dislike_count = $3
            WHERE id = $1
            ",
        )
        .bind(post_id.into_inner())
        .bind(counts.likes)
        .bind(counts.dislikes)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            kind = %transition.resulting_kind(),
            likes = counts.likes,
            dislikes = counts.dislikes,
            "Reaction transition committed"
        );

        Ok(ReactionResult { transition, counts })
    }
}
