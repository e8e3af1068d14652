/// Business logic layer for the social content core
///
/// This module provides high-level operations:
/// - Trends: hashtag trend aggregation over posts
/// - Stories: story lifecycle with lazy expiry and view tracking
/// - Posts: post creation, retrieval, updates, search
/// - Comments: comments on posts, kept in step with post comment counts
/// - Users: profile lookups for story authors
pub mod comments;
pub mod hashtags;
pub mod posts;
pub mod stories;
pub mod trends;
pub mod users;

// Re-export commonly used services
pub use comments::CommentService;
pub use hashtags::extract_hashtags;
pub use posts::PostService;
pub use stories::StoriesService;
pub use trends::{compute_trends, compute_trends_with, TrendAggregator, TrendSettings};
pub use users::UserService;
