//! # feed-db
//!
//! Engagement store adapter implementing the feed-core repository traits.
//!
//! ## Overview
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repository implementations
//! - [`MemoryStore`], an in-process implementation of the same traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feed_db::{create_pool, run_migrations, DatabaseConfig, PgPostRepository, MIGRATIONS_DIR};
//! use feed_core::traits::PostRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/feed", 10, 1)).await?;
//!     run_migrations(&pool, MIGRATIONS_DIR).await?;
//!     let posts = PgPostRepository::new(pool);
//!     let snapshot = posts.list_snapshot().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, PgPool, MIGRATIONS_DIR};
pub use repositories::{
    PgCommentRepository, PgPostRepository, PgReactionRepository, PgSubscriptionRepository,
    PgUserRepository,
};
