/// Application wiring: stores, services and the trend refresh job
use actix_web::web;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::TrendsCache;
use crate::db::{CommentStore, PostStore, SeedData, StoryStore, UserStore};
use crate::handlers::{self, TrendsHandlerState};
use crate::jobs::TrendsRefreshJob;
use crate::services::{
    CommentService, PostService, StoriesService, TrendAggregator, TrendSettings, UserService,
};

/// Shared handles registered as actix app data.
#[derive(Clone)]
pub struct AppState {
    pub posts: web::Data<PostService>,
    pub comments: web::Data<CommentService>,
    pub stories: web::Data<StoriesService>,
    pub users: web::Data<UserService>,
    pub trends: web::Data<TrendsHandlerState>,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        post_store: Arc<dyn PostStore>,
        story_store: Arc<dyn StoryStore>,
        comment_store: Arc<dyn CommentStore>,
        settings: TrendSettings,
        refresh_interval: Duration,
    ) -> Self {
        let aggregator = Arc::new(TrendAggregator::with_settings(post_store.clone(), settings));
        let cache = Arc::new(TrendsCache::new());
        let job = TrendsRefreshJob::new(aggregator, cache.clone()).with_interval(refresh_interval);

        Self {
            comments: web::Data::new(CommentService::new(comment_store, post_store.clone())),
            posts: web::Data::new(PostService::new(post_store)),
            stories: web::Data::new(StoriesService::new(story_store, user_store.clone())),
            users: web::Data::new(UserService::new(user_store)),
            trends: web::Data::new(TrendsHandlerState { cache, job }),
        }
    }

    /// Build in-memory stores from seed data.
    pub fn from_seed(seed: SeedData, settings: TrendSettings, refresh_interval: Duration) -> Self {
        let stores = seed.into_stores();
        Self::new(
            Arc::new(stores.users),
            Arc::new(stores.posts),
            Arc::new(stores.stories),
            Arc::new(stores.comments),
            settings,
            refresh_interval,
        )
    }

    pub fn refresh_job(&self) -> TrendsRefreshJob {
        self.trends.job.clone()
    }

    /// Register app data and all routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.posts.clone())
            .app_data(self.comments.clone())
            .app_data(self.stories.clone())
            .app_data(self.users.clone())
            .app_data(self.trends.clone());
        handlers::configure(cfg);
    }
}
