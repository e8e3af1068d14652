//! Seed data loading
//!
//! Fills the in-memory stores from a JSON document of the form
//! `{"users": [...], "posts": [...], "stories": [...], "comments": [...]}`.
//! Every section is optional. Derived fields are never trusted: post hashtags
//! and comment counts are recomputed and story expiry follows the fixed TTL.

use anyhow::{bail, ensure, Context};
use chrono::Duration;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::{InMemoryCommentStore, InMemoryPostStore, InMemoryStoryStore, InMemoryUserStore};
use crate::models::{Comment, Post, Story, UserProfile, STORY_TTL_HOURS};
use crate::services::hashtags::extract_hashtags;

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub stories: Vec<Story>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Stores built from a seed document.
pub struct SeededStores {
    pub users: InMemoryUserStore,
    pub posts: InMemoryPostStore,
    pub stories: InMemoryStoryStore,
    pub comments: InMemoryCommentStore,
}

fn ensure_unique_ids(kind: &str, ids: impl IntoIterator<Item = i64>) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        ensure!(seen.insert(id), "duplicate {} id {}", kind, id);
    }
    Ok(())
}

impl SeedData {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let mut seed: SeedData = serde_json::from_str(raw).context("invalid seed document")?;
        seed.normalize()?;
        Ok(seed)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to parse seed file {}", path.display()))
    }

    /// Reject duplicate ids and rebuild every derived field.
    fn normalize(&mut self) -> anyhow::Result<()> {
        ensure_unique_ids("user", self.users.iter().map(|u| u.id))?;
        ensure_unique_ids("post", self.posts.iter().map(|p| p.id))?;
        ensure_unique_ids("story", self.stories.iter().map(|s| s.id))?;
        ensure_unique_ids("comment", self.comments.iter().map(|c| c.id))?;

        for post in &mut self.posts {
            post.hashtags = extract_hashtags(&post.content);
            post.comments = 0;
        }
        for comment in &self.comments {
            let Some(post) = self.posts.iter_mut().find(|p| p.id == comment.post_id) else {
                bail!(
                    "comment {} refers to unknown post {}",
                    comment.id,
                    comment.post_id
                );
            };
            post.comments += 1;
        }

        for story in &mut self.stories {
            let expires_at = story.created_at + Duration::hours(STORY_TTL_HOURS);
            if story.expires_at != expires_at {
                tracing::warn!(
                    story_id = story.id,
                    seeded = %story.expires_at,
                    "Seeded story expiry does not match its TTL; recomputed"
                );
                story.expires_at = expires_at;
            }
            story.viewed_by.sort_unstable();
            story.viewed_by.dedup();
        }
        Ok(())
    }

    pub fn into_stores(self) -> SeededStores {
        SeededStores {
            users: InMemoryUserStore::with_users(self.users),
            posts: InMemoryPostStore::with_posts(self.posts),
            stories: InMemoryStoryStore::with_stories(self.stories),
            comments: InMemoryCommentStore::with_comments(self.comments),
        }
    }
}
