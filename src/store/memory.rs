//! In-process store keyed by UUIDv7, so `BTreeMap` order is creation order.

use super::{PostStore, StoreError};
use crate::model::{NewPost, Post, PostPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<BTreeMap<Uuid, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<Uuid, Post>>, StoreError> {
        self.posts
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<Uuid, Post>>, StoreError> {
        self.posts
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        let created = Post {
            id: Uuid::now_v7(),
            title: post.title,
            body: post.body,
            tags: post.tags,
            published_date: Utc::now(),
        };
        self.write()?.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, StoreError> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.read()?.values().rev().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.write()?.remove(&id))
    }

    async fn find_by_id_and_update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut posts = self.write()?;
        Ok(posts.get_mut(&id).map(|post| {
            patch.apply(post);
            post.clone()
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.into(),
            body: "body".into(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn pages_newest_first() {
        let store = MemoryPostStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.create(new_post(&format!("p{i}"))).await.unwrap().id);
        }
        let page = store.find_page(1, 2).await.unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["p3", "p2"]);
        assert_eq!(store.count().await.unwrap(), 5);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn delete_is_reported_once() {
        let store = MemoryPostStore::new();
        let id = store.create(new_post("gone")).await.unwrap().id;
        assert!(store.find_by_id_and_delete(id).await.unwrap().is_some());
        assert!(store.find_by_id_and_delete(id).await.unwrap().is_none());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_id_returns_none() {
        let store = MemoryPostStore::new();
        let patch = PostPatch {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(store.find_by_id_and_update(Uuid::now_v7(), patch).await.unwrap().is_none());
    }
}
