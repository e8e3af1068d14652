/// Data models for the social content core
///
/// This module defines structures for:
/// - Post: text posts with hashtags derived from their content
/// - Comment: replies attached to a post
/// - Story: ephemeral content that expires 24 hours after creation
/// - UserProfile: author data used to enrich stories
/// - HashtagTrend: per-call trend aggregation output
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::hashtags::extract_hashtags;

/// Fixed time-to-live of a story.
pub const STORY_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    /// Derived from `content`; never edited on its own.
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes: u64,
    /// Number of comments stored for this post.
    #[serde(default)]
    pub comments: u64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: i64,
        user_id: i64,
        content: impl Into<String>,
        image_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        Self {
            id,
            user_id,
            hashtags: extract_hashtags(&content),
            content,
            image_url,
            likes: 0,
            comments: 0,
            created_at,
        }
    }

    /// Replace the content and re-derive the hashtag list from it.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.hashtags = extract_hashtags(&self.content);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: i64,
        post_id: i64,
        user_id: i64,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            post_id,
            user_id,
            content: content.into(),
            likes: 0,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub viewed_by: Vec<i64>,
}

impl Story {
    pub fn new(
        id: i64,
        user_id: i64,
        content: Option<String>,
        media_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            content,
            media_url,
            created_at,
            expires_at: created_at + Duration::hours(STORY_TTL_HOURS),
            viewed_by: Vec::new(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_owner(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    pub fn has_viewed(&self, user_id: i64) -> bool {
        self.viewed_by.contains(&user_id)
    }

    /// Append a viewer. Returns false when the viewer was already recorded.
    pub fn record_view(&mut self, viewer_id: i64) -> bool {
        if self.has_viewed(viewer_id) {
            return false;
        }
        self.viewed_by.push(viewer_id);
        true
    }
}

/// Story joined with its author's profile.
#[derive(Debug, Clone, Serialize)]
pub struct StoryWithAuthor {
    #[serde(flatten)]
    pub story: Story,
    pub author: Option<UserProfile>,
}

/// Time left before a story expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    Expired,
    Remaining { hours: i64, minutes: i64 },
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Expired => write!(f, "Expired"),
            TimeRemaining::Remaining { hours, minutes } if *hours > 0 => {
                write!(f, "{}h {}m", hours, minutes)
            }
            TimeRemaining::Remaining { minutes, .. } => write!(f, "{}m", minutes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Aggregated usage of one hashtag. Rebuilt on every aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagTrend {
    /// Casing of the first occurrence seen while scanning posts
    pub name: String,
    pub total_count: usize,
    /// Daily post counts, oldest day first; the last element is today.
    pub sparkline: Vec<u32>,
    pub trend: TrendDirection,
}
