use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::{StoryStore, UserStore};
use crate::error::{AppError, Result};
use crate::metrics::stories as metrics;
use crate::models::{Story, StoryWithAuthor, TimeRemaining};

/// Story lifecycle: creation, lazy expiry and view tracking.
///
/// Every entry point sweeps expired stories before touching the store, so no
/// background timer is needed. Sweep-then-mutate sequences run under
/// `write_gate`.
pub struct StoriesService {
    stories: Arc<dyn StoryStore>,
    users: Arc<dyn UserStore>,
    write_gate: Mutex<()>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl StoriesService {
    pub fn new(stories: Arc<dyn StoryStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            stories,
            users,
            write_gate: Mutex::new(()),
        }
    }

    /// Delete every story whose expiry is at or before `now`.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let removed = self
            .stories
            .delete_where(&|story: &Story| story.is_expired(now))
            .await?;
        if removed > 0 {
            metrics::record_expired(removed);
            tracing::info!(expired = removed, "Cleaned up expired stories");
        }
        Ok(removed)
    }

    pub async fn create(
        &self,
        author_id: i64,
        content: Option<&str>,
        media_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Story> {
        let content = non_empty(content);
        let media_url = non_empty(media_url);
        if content.is_none() && media_url.is_none() {
            return Err(AppError::ValidationError(
                "story needs content or a media url".into(),
            ));
        }

        let _gate = self.write_gate.lock().await;
        self.sweep_expired(now).await?;

        let story = Story::new(self.stories.next_id(), author_id, content, media_url, now);
        self.stories.insert(story.clone()).await?;

        metrics::record_created();
        tracing::info!(
            story_id = story.id,
            user_id = author_id,
            expires_at = %story.expires_at,
            "Story created"
        );
        Ok(story)
    }

    /// Active stories, newest first.
    pub async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Story>> {
        self.sweep_expired(now).await?;
        let mut stories = self.stories.list().await?;
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }

    /// Active stories of one author, newest first.
    pub async fn list_by_user(&self, user_id: i64, now: DateTime<Utc>) -> Result<Vec<Story>> {
        let mut stories = self.list_active(now).await?;
        stories.retain(|story| story.is_owner(user_id));
        Ok(stories)
    }

    /// Active stories with their author profiles.
    ///
    /// Author lookups run concurrently. A failed or missing lookup leaves
    /// `author` empty instead of failing the listing.
    pub async fn list_active_with_authors(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<StoryWithAuthor>> {
        let stories = self.list_active(now).await?;
        Ok(join_all(stories.into_iter().map(|story| self.with_author(story))).await)
    }

    /// Join a story with its author's profile, if one can be found.
    pub async fn with_author(&self, story: Story) -> StoryWithAuthor {
        let author = self.users.find(story.user_id).await.unwrap_or_else(|err| {
            tracing::warn!(story_id = story.id, error = %err, "Author lookup failed");
            None
        });
        StoryWithAuthor { story, author }
    }

    pub async fn get_by_id(&self, id: i64, now: DateTime<Utc>) -> Result<Story> {
        self.sweep_expired(now).await?;
        self.stories
            .find(id)
            .await?
            .ok_or_else(|| AppError::story_not_found(id))
    }

    /// Record that `viewer_id` has seen the story. Idempotent.
    pub async fn mark_viewed(
        &self,
        story_id: i64,
        viewer_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Story> {
        let _gate = self.write_gate.lock().await;
        self.sweep_expired(now).await?;
        self.record_view(story_id, viewer_id).await
    }

    /// Open a story as `viewer_id`: a view is recorded unless the viewer is
    /// the author.
    pub async fn open(&self, story_id: i64, viewer_id: i64, now: DateTime<Utc>) -> Result<Story> {
        let _gate = self.write_gate.lock().await;
        self.sweep_expired(now).await?;

        let story = self
            .stories
            .find(story_id)
            .await?
            .ok_or_else(|| AppError::story_not_found(story_id))?;
        if story.is_owner(viewer_id) || story.has_viewed(viewer_id) {
            return Ok(story);
        }
        self.record_view(story_id, viewer_id).await
    }

    pub async fn remove(&self, id: i64, now: DateTime<Utc>) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.sweep_expired(now).await?;
        if !self.stories.delete(id).await? {
            return Err(AppError::story_not_found(id));
        }
        tracing::info!(story_id = id, "Story deleted");
        Ok(())
    }

    pub fn is_owner(story: &Story, user_id: i64) -> bool {
        story.is_owner(user_id)
    }

    pub fn has_viewed(story: &Story, user_id: i64) -> bool {
        story.has_viewed(user_id)
    }

    pub fn time_remaining(story: &Story, now: DateTime<Utc>) -> TimeRemaining {
        let remaining = story.expires_at - now;
        if remaining <= chrono::Duration::zero() {
            return TimeRemaining::Expired;
        }
        TimeRemaining::Remaining {
            hours: remaining.num_hours(),
            minutes: remaining.num_minutes() % 60,
        }
    }

    // Caller holds the write gate and has swept.
    async fn record_view(&self, story_id: i64, viewer_id: i64) -> Result<Story> {
        let mut story = self
            .stories
            .find(story_id)
            .await?
            .ok_or_else(|| AppError::story_not_found(story_id))?;

        if story.record_view(viewer_id) {
            if !self.stories.update(story.clone()).await? {
                return Err(AppError::story_not_found(story_id));
            }
            metrics::record_view();
            tracing::debug!(story_id, viewer_id, "Story view recorded");
        }
        Ok(story)
    }
}
