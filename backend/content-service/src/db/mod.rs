/// Data access layer
///
/// Stores are dumb containers behind async traits. Write policy (expiry,
/// validation, id assignment timing) lives in the services; each store owns
/// its id counter so ids are never computed from the current contents.
///
/// The shipped implementations keep records in process memory.
use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, Post, Story, UserProfile};

pub mod comment_repo;
pub mod post_repo;
pub mod seed;
pub mod story_repo;
pub mod user_repo;

pub use comment_repo::InMemoryCommentStore;
pub use post_repo::InMemoryPostStore;
pub use seed::{SeedData, SeededStores};
pub use story_repo::InMemoryStoryStore;
pub use user_repo::InMemoryUserStore;

/// Edit applied by [`PostStore::update_with`]. An error leaves the post untouched.
pub type PostEdit<'a> = &'a (dyn Fn(&mut Post) -> Result<()> + Send + Sync);

/// Predicate passed to [`StoryStore::delete_where`].
pub type StoryPredicate<'a> = &'a (dyn Fn(&Story) -> bool + Send + Sync);

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Allocate a fresh id. Ids are never handed out twice.
    fn next_id(&self) -> i64;

    /// All posts in scan order, newest inserted first.
    async fn all_posts(&self) -> Result<Vec<Post>>;

    async fn find(&self, id: i64) -> Result<Option<Post>>;

    async fn insert(&self, post: Post) -> Result<()>;

    /// Apply `edit` to the stored post in one step. Returns the edited post,
    /// or `None` if absent.
    async fn update_with(&self, id: i64, edit: PostEdit<'_>) -> Result<Option<Post>>;

    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Allocate a fresh id. Ids are never handed out twice.
    fn next_id(&self) -> i64;

    async fn insert(&self, story: Story) -> Result<()>;

    /// Remove every story matching the predicate. Returns the number removed.
    async fn delete_where(&self, predicate: StoryPredicate<'_>) -> Result<usize>;

    async fn find(&self, id: i64) -> Result<Option<Story>>;

    /// Replace the story with the same id. Returns false if absent.
    async fn update(&self, story: Story) -> Result<bool>;

    async fn delete(&self, id: i64) -> Result<bool>;

    async fn list(&self) -> Result<Vec<Story>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    fn next_id(&self) -> i64;

    async fn insert(&self, comment: Comment) -> Result<()>;

    async fn find(&self, id: i64) -> Result<Option<Comment>>;

    /// Comments attached to one post, in storage order.
    async fn by_post(&self, post_id: i64) -> Result<Vec<Comment>>;

    /// Replace the comment with the same id. Returns false if absent.
    async fn update(&self, comment: Comment) -> Result<bool>;

    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<UserProfile>>;

    async fn list(&self) -> Result<Vec<UserProfile>>;

    async fn insert(&self, user: UserProfile) -> Result<()>;
}
