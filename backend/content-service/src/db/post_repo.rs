use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{PostEdit, PostStore};
use crate::error::Result;
use crate::models::Post;

/// Post store held in process memory. New posts go to the front.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// Seed the store, newest first regardless of input order.
    pub fn with_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            posts: RwLock::new(posts),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn all_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn find(&self, id: i64) -> Result<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<()> {
        self.posts.write().await.insert(0, post);
        Ok(())
    }

    async fn update_with(&self, id: i64, edit: PostEdit<'_>) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(slot) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let mut edited = slot.clone();
        edit(&mut edited)?;
        *slot = edited.clone();
        Ok(Some(edited))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}
