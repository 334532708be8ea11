//! Storage seam for posts. Handlers only see [`PostStore`]; ids and publish dates are assigned here.

mod memory;
mod postgres;

pub use memory::MemoryPostStore;
pub use postgres::{ensure_database_exists, PgPostStore, DEFAULT_POSTS_TABLE};

use crate::model::{NewPost, Post, PostPatch};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Document-store client. Every method is a single round trip.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post, assigning `id` and `published_date`.
    async fn create(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Posts ordered by id descending, skipping `skip` and returning at most `limit`.
    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Returns the removed post, or `None` when nothing matched.
    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Applies `patch` and returns the post as it is after the update.
    async fn find_by_id_and_update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError>;

    /// Cheap liveness probe used by the readiness route.
    async fn ping(&self) -> Result<(), StoreError>;
}
