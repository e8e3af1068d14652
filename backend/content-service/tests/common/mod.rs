//! Shared fixtures for HTTP integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use social_content::db::SeedData;
use social_content::models::{Post, Story, UserProfile};
use social_content::services::TrendSettings;
use social_content::AppState;

pub fn user(id: i64, username: &str, display_name: &str) -> UserProfile {
    UserProfile {
        id,
        username: username.to_string(),
        display_name: display_name.to_string(),
        avatar_url: None,
        bio: None,
        followers: 0,
        following: 0,
    }
}

pub fn users() -> Vec<UserProfile> {
    vec![
        user(1, "ada", "Ada Lovelace"),
        user(2, "grace", "Grace Hopper"),
        user(3, "linus", "Linus Torvalds"),
    ]
}

pub fn post(id: i64, user_id: i64, content: &str, created_at: DateTime<Utc>) -> Post {
    Post::new(id, user_id, content, None, created_at)
}

/// A story created two days ago; it is already past its expiry.
pub fn expired_story(id: i64, user_id: i64) -> Story {
    Story::new(
        id,
        user_id,
        Some("old news".to_string()),
        None,
        Utc::now() - Duration::days(2),
    )
}

pub fn state_with(seed: SeedData) -> AppState {
    AppState::from_seed(
        seed,
        TrendSettings::default(),
        std::time::Duration::from_secs(300),
    )
}

pub fn empty_state() -> AppState {
    state_with(SeedData {
        users: users(),
        ..SeedData::default()
    })
}
