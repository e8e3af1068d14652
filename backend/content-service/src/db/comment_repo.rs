use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::CommentStore;
use crate::error::Result;
use crate::models::Comment;

/// Comment store held in process memory, in insertion order.
pub struct InMemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::with_comments(Vec::new())
    }

    pub fn with_comments(comments: Vec<Comment>) -> Self {
        let next_id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            comments: RwLock::new(comments),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn insert(&self, comment: Comment) -> Result<()> {
        self.comments.write().await.push(comment);
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    async fn by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn update(&self, comment: Comment) -> Result<bool> {
        let mut comments = self.comments.write().await;
        match comments.iter_mut().find(|c| c.id == comment.id) {
            Some(slot) => {
                *slot = comment;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn comment(id: i64, post_id: i64) -> Comment {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap();
        Comment::new(id, post_id, 1, "nice", at)
    }

    #[tokio::test]
    async fn test_by_post_filters() {
        let store = InMemoryCommentStore::with_comments(vec![
            comment(1, 10),
            comment(2, 11),
            comment(3, 10),
        ]);
        let ids: Vec<i64> = store.by_post(10).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.next_id(), 4);
    }

    #[tokio::test]
    async fn test_missing_comment() {
        let store = InMemoryCommentStore::new();
        assert!(store.find(1).await.unwrap().is_none());
        assert!(!store.update(comment(1, 1)).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
    }
}
