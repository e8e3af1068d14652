/// Comment service - handles comment creation, retrieval, and management
///
/// The parent post's `comments` counter is adjusted in the same write-gated
/// step as the comment itself.
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::{CommentStore, PostStore};
use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
    write_gate: Mutex<()>,
}

fn non_blank(content: &str) -> Result<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::ValidationError("comment cannot be empty".into()));
    }
    Ok(content)
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, posts: Arc<dyn PostStore>) -> Self {
        Self {
            comments,
            posts,
            write_gate: Mutex::new(()),
        }
    }

    /// Get a comment by ID
    pub async fn get_comment(&self, comment_id: i64) -> Result<Comment> {
        self.comments
            .find(comment_id)
            .await?
            .ok_or_else(|| AppError::comment_not_found(comment_id))
    }

    /// Comments on a post, newest first
    pub async fn get_post_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        if self.posts.find(post_id).await?.is_none() {
            return Err(AppError::post_not_found(post_id));
        }
        let mut comments = self.comments.by_post(post_id).await?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    /// Create a comment and bump the post's comment count
    pub async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        let content = non_blank(content)?;

        let _gate = self.write_gate.lock().await;
        self.posts
            .update_with(post_id, &|post: &mut Post| {
                post.comments += 1;
                Ok(())
            })
            .await?
            .ok_or_else(|| AppError::post_not_found(post_id))?;

        let comment = Comment::new(self.comments.next_id(), post_id, user_id, content, now);
        self.comments.insert(comment.clone()).await?;

        tracing::info!(comment_id = comment.id, post_id, user_id, "Comment created");
        Ok(comment)
    }

    /// Replace comment content
    pub async fn update_comment(&self, comment_id: i64, content: &str) -> Result<Comment> {
        let content = non_blank(content)?;

        let _gate = self.write_gate.lock().await;
        let mut comment = self.get_comment(comment_id).await?;
        comment.content = content.to_string();
        if !self.comments.update(comment.clone()).await? {
            return Err(AppError::comment_not_found(comment_id));
        }
        tracing::info!(comment_id, "Comment updated");
        Ok(comment)
    }

    /// Delete a comment and decrement the post's comment count
    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        let comment = self.get_comment(comment_id).await?;
        if !self.comments.delete(comment_id).await? {
            return Err(AppError::comment_not_found(comment_id));
        }
        // The post may already be gone.
        self.posts
            .update_with(comment.post_id, &|post: &mut Post| {
                post.comments = post.comments.saturating_sub(1);
                Ok(())
            })
            .await?;

        tracing::info!(comment_id, post_id = comment.post_id, "Comment deleted");
        Ok(())
    }

    pub async fn like_comment(&self, comment_id: i64) -> Result<Comment> {
        let _gate = self.write_gate.lock().await;
        let mut comment = self.get_comment(comment_id).await?;
        comment.likes += 1;
        if !self.comments.update(comment.clone()).await? {
            return Err(AppError::comment_not_found(comment_id));
        }
        Ok(comment)
    }

    /// Drop every comment of a deleted post. Returns the number removed.
    pub async fn delete_post_comments(&self, post_id: i64) -> Result<usize> {
        let _gate = self.write_gate.lock().await;
        let mut removed = 0;
        for comment in self.comments.by_post(post_id).await? {
            if self.comments.delete(comment.id).await? {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!(post_id, removed, "Comments of deleted post removed");
        }
        Ok(removed)
    }
}
