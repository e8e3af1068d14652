use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{StoryPredicate, StoryStore};
use crate::error::Result;
use crate::models::Story;

/// Story store held in process memory.
pub struct InMemoryStoryStore {
    stories: RwLock<Vec<Story>>,
    next_id: AtomicI64,
}

impl InMemoryStoryStore {
    pub fn new() -> Self {
        Self::with_stories(Vec::new())
    }

    /// Seed the store. The id counter starts after the largest seeded id.
    pub fn with_stories(stories: Vec<Story>) -> Self {
        let next_id = stories.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            stories: RwLock::new(stories),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryStoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryStore for InMemoryStoryStore {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn insert(&self, story: Story) -> Result<()> {
        self.stories.write().await.insert(0, story);
        Ok(())
    }

    async fn delete_where(&self, predicate: StoryPredicate<'_>) -> Result<usize> {
        let mut stories = self.stories.write().await;
        let before = stories.len();
        stories.retain(|story| !predicate(story));
        Ok(before - stories.len())
    }

    async fn find(&self, id: i64) -> Result<Option<Story>> {
        let stories = self.stories.read().await;
        Ok(stories.iter().find(|s| s.id == id).cloned())
    }

    async fn update(&self, story: Story) -> Result<bool> {
        let mut stories = self.stories.write().await;
        match stories.iter_mut().find(|s| s.id == story.id) {
            Some(slot) => {
                *slot = story;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut stories = self.stories.write().await;
        match stories.iter().position(|s| s.id == id) {
            Some(index) => {
                stories.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<Story>> {
        Ok(self.stories.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn story(id: i64, user_id: i64) -> Story {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Story::new(id, user_id, Some("hello".into()), None, created)
    }

    #[test]
    fn test_counter_starts_after_seeded_ids() {
        let store = InMemoryStoryStore::with_stories(vec![story(4, 1), story(9, 2)]);
        assert_eq!(store.next_id(), 10);
        assert_eq!(store.next_id(), 11);
    }

    #[tokio::test]
    async fn test_delete_where_reports_removed_count() {
        let store = InMemoryStoryStore::with_stories(vec![story(1, 1), story(2, 2), story(3, 1)]);
        let removed = store.delete_where(&|s: &Story| s.user_id == 1).await.unwrap();
        assert_eq!(removed, 2);
        let left = store.list().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = InMemoryStoryStore::new();
        assert!(!store.update(story(1, 1)).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
        assert!(store.find(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryStoryStore::new();
        let first = store.next_id();
        store.insert(story(first, 1)).await.unwrap();
        assert!(store.delete(first).await.unwrap());
        assert!(store.next_id() > first);
    }
}
