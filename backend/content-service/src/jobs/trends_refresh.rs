use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{TrendSnapshot, TrendsCache};
use crate::error::Result;
use crate::metrics::trends as metrics;
use crate::services::TrendAggregator;

/// Refresh interval for the trend snapshot.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Background job that recomputes hashtag trends on a cadence.
///
/// The aggregator is a pure function of the post set; this job owns the
/// refresh policy and publishes each result into the [`TrendsCache`].
#[derive(Clone)]
pub struct TrendsRefreshJob {
    aggregator: Arc<TrendAggregator>,
    cache: Arc<TrendsCache>,
    interval: Duration,
}

impl TrendsRefreshJob {
    pub fn new(aggregator: Arc<TrendAggregator>, cache: Arc<TrendsCache>) -> Self {
        Self {
            aggregator,
            cache,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the refresh loop. Intended to be spawned on the Tokio runtime.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        info!(
            "Trends refresh job started (interval: {:?})",
            self.interval
        );

        loop {
            ticker.tick().await;

            match self.refresh_once(Utc::now()).await {
                Ok(snapshot) => debug!(
                    trends = snapshot.trends.len(),
                    "Trend snapshot refreshed"
                ),
                Err(err) => error!("Trends refresh failed: {}", err),
            }
        }
    }

    /// Spawn the refresh loop as a Tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Compute one snapshot as of `now` and publish it.
    pub async fn refresh_once(&self, now: DateTime<Utc>) -> Result<TrendSnapshot> {
        let started = Instant::now();
        match self.aggregator.compute(now).await {
            Ok(trends) => {
                metrics::record_refresh("success", started.elapsed());
                let snapshot = TrendSnapshot {
                    computed_at: now,
                    trends,
                };
                self.cache.store(snapshot.clone()).await;
                Ok(snapshot)
            }
            Err(err) => {
                metrics::record_refresh("error", started.elapsed());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryPostStore, PostStore};
    use crate::models::Post;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_refresh_once_publishes_snapshot() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let posts = Arc::new(InMemoryPostStore::new());
        for _ in 0..3 {
            let id = posts.next_id();
            posts
                .insert(Post::new(id, 1, "#launch day", None, now))
                .await
                .unwrap();
        }

        let cache = Arc::new(TrendsCache::new());
        let job = TrendsRefreshJob::new(Arc::new(TrendAggregator::new(posts)), cache.clone());

        let snapshot = job.refresh_once(now).await.unwrap();
        assert_eq!(snapshot.trends.len(), 1);

        let cached = cache.latest().await.unwrap();
        assert_eq!(cached.computed_at, now);
        assert_eq!(cached.trends[0].name, "#launch");
    }

    #[tokio::test]
    async fn test_spawned_job_fills_cache() {
        let cache = Arc::new(TrendsCache::new());
        let job = TrendsRefreshJob::new(
            Arc::new(TrendAggregator::new(Arc::new(InMemoryPostStore::new()))),
            cache.clone(),
        )
        .with_interval(Duration::from_secs(60));

        let handle = job.spawn();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(cache.latest().await.is_some());
        handle.abort();
    }
}
