use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::HashtagTrend;

/// Trends computed at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSnapshot {
    pub computed_at: DateTime<Utc>,
    pub trends: Vec<HashtagTrend>,
}

/// Latest trend snapshot shared between the refresh job and request handlers.
#[derive(Default)]
pub struct TrendsCache {
    latest: RwLock<Option<TrendSnapshot>>,
}

impl TrendsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<TrendSnapshot> {
        let snapshot = self.latest.read().await.clone();
        debug!(
            hit = snapshot.is_some(),
            "Trends cache {}",
            if snapshot.is_some() { "HIT" } else { "MISS" }
        );
        snapshot
    }

    /// Store a snapshot unless a newer one is already cached.
    pub async fn store(&self, snapshot: TrendSnapshot) {
        let mut latest = self.latest.write().await;
        match latest.as_ref() {
            Some(current) if current.computed_at > snapshot.computed_at => {
                debug!("Discarding stale trend snapshot");
            }
            _ => *latest = Some(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn snapshot(at: DateTime<Utc>, tags: usize) -> TrendSnapshot {
        TrendSnapshot {
            computed_at: at,
            trends: (0..tags)
                .map(|i| HashtagTrend {
                    name: format!("#t{}", i),
                    total_count: 3,
                    sparkline: vec![0; 7],
                    trend: crate::models::TrendDirection::Down,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        assert!(TrendsCache::new().latest().await.is_none());
    }

    #[tokio::test]
    async fn test_older_snapshot_does_not_replace_newer() {
        let cache = TrendsCache::new();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        cache.store(snapshot(t0 + Duration::minutes(5), 2)).await;
        cache.store(snapshot(t0, 1)).await;
        assert_eq!(cache.latest().await.unwrap().trends.len(), 2);

        cache.store(snapshot(t0 + Duration::minutes(10), 0)).await;
        assert!(cache.latest().await.unwrap().trends.is_empty());
    }
}
