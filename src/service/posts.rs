//! Post operations over a [`PostStore`]. Inputs arrive already validated.

use crate::error::AppError;
use crate::model::{NewPost, Post, PostPatch};
use crate::store::PostStore;
use uuid::Uuid;

/// Posts per list page.
pub const PAGE_SIZE: u64 = 10;

pub struct PostPage {
    /// Posts in list form (bodies truncated).
    pub posts: Vec<Post>,
    pub last_page: u64,
}

/// Highest valid page for `count` posts; 0 when there are none.
pub fn last_page(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

/// Records to skip for a 1-based `page`.
pub fn page_offset(page: i64) -> Result<u64, AppError> {
    if page < 1 {
        return Err(AppError::InvalidPage);
    }
    Ok(((page - 1) as u64).saturating_mul(PAGE_SIZE))
}

pub struct PostService;

impl PostService {
    pub async fn create(store: &dyn PostStore, post: NewPost) -> Result<Post, AppError> {
        let created = store.create(post).await?;
        tracing::info!(id = %created.id, "post created");
        Ok(created)
    }

    pub async fn list(store: &dyn PostStore, page: i64) -> Result<PostPage, AppError> {
        let skip = page_offset(page)?;
        let posts = store.find_page(skip, PAGE_SIZE).await?;
        let count = store.count().await?;
        Ok(PostPage {
            posts: posts.iter().map(Post::to_list_view).collect(),
            last_page: last_page(count),
        })
    }

    pub async fn read(store: &dyn PostStore, id: Uuid) -> Result<Post, AppError> {
        store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Idempotent: removing an absent id is not an error.
    pub async fn remove(store: &dyn PostStore, id: Uuid) -> Result<(), AppError> {
        if store.find_by_id_and_delete(id).await?.is_some() {
            tracing::info!(%id, "post removed");
        } else {
            tracing::debug!(%id, "remove: no such post");
        }
        Ok(())
    }

    pub async fn update(store: &dyn PostStore, id: Uuid, patch: PostPatch) -> Result<Post, AppError> {
        let updated = store.find_by_id_and_update(id, patch).await?.ok_or(AppError::NotFound)?;
        tracing::info!(%id, "post updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_ceiling_of_count() {
        assert_eq!(last_page(0), 0);
        assert_eq!(last_page(1), 1);
        assert_eq!(last_page(10), 1);
        assert_eq!(last_page(11), 2);
        assert_eq!(last_page(95), 10);
    }

    #[test]
    fn page_offset_rejects_non_positive_pages() {
        assert!(matches!(page_offset(0), Err(AppError::InvalidPage)));
        assert!(matches!(page_offset(-3), Err(AppError::InvalidPage)));
        assert_eq!(page_offset(1).unwrap(), 0);
        assert_eq!(page_offset(3).unwrap(), 20);
    }

    #[test]
    fn page_offset_saturates() {
        assert_eq!(page_offset(i64::MAX).unwrap(), u64::MAX);
    }
}
