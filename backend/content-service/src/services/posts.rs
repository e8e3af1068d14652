/// Post service - handles post creation, retrieval, and management
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::models::Post;

/// Maximum post length in characters
pub const MAX_POST_CHARS: usize = 280;

pub struct PostService {
    store: Arc<dyn PostStore>,
}

fn validate_content(content: &str, has_image: bool) -> Result<()> {
    if content.is_empty() && !has_image {
        return Err(AppError::ValidationError(
            "post needs content or an image".into(),
        ));
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(AppError::ValidationError(format!(
            "content must be {} characters or less",
            MAX_POST_CHARS
        )));
    }
    Ok(())
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        self.store
            .find(post_id)
            .await?
            .ok_or_else(|| AppError::post_not_found(post_id))
    }

    /// All posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.store.all_posts().await?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Posts of one user, newest first
    pub async fn get_user_posts(&self, user_id: i64) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .store
            .all_posts()
            .await?
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Create a new post
    pub async fn create_post(
        &self,
        user_id: i64,
        content: &str,
        image_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Post> {
        let content = content.trim();
        let image_url = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        validate_content(content, image_url.is_some())?;

        let post = Post::new(self.store.next_id(), user_id, content, image_url, now);
        self.store.insert(post.clone()).await?;

        tracing::info!(
            post_id = post.id,
            user_id,
            hashtags = post.hashtags.len(),
            "Post created"
        );
        Ok(post)
    }

    /// Update post content and/or image. Hashtags follow the new content.
    pub async fn update_post(
        &self,
        post_id: i64,
        content: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let post = self
            .store
            .update_with(post_id, &|post: &mut Post| {
                if let Some(url) = image_url {
                    let url = url.trim();
                    post.image_url = (!url.is_empty()).then(|| url.to_string());
                }
                if let Some(content) = content {
                    post.set_content(content.trim());
                }
                validate_content(&post.content, post.image_url.is_some())
            })
            .await?
            .ok_or_else(|| AppError::post_not_found(post_id))?;

        tracing::info!(post_id, "Post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        if !self.store.delete(post_id).await? {
            return Err(AppError::post_not_found(post_id));
        }
        tracing::info!(post_id, "Post deleted");
        Ok(())
    }

    pub async fn like_post(&self, post_id: i64) -> Result<Post> {
        self.store
            .update_with(post_id, &|post: &mut Post| {
                post.likes += 1;
                Ok(())
            })
            .await?
            .ok_or_else(|| AppError::post_not_found(post_id))
    }

    /// Case-insensitive match against content or any hashtag
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .store
            .all_posts()
            .await?
            .into_iter()
            .filter(|p| {
                p.content.to_lowercase().contains(&needle)
                    || p.hashtags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect())
    }
}
