/// Hashtag trend aggregation
///
/// Pure aggregation over a post set. Refresh cadence is the caller's policy
/// (see `jobs::trends_refresh`); nothing here reads a clock.
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use super::hashtags::normalize_hashtag;
use crate::db::PostStore;
use crate::error::Result;
use crate::models::{HashtagTrend, Post, TrendDirection};

/// Minimum number of posts a tag must appear in to be reported (inclusive).
pub const MIN_POSTS_PER_TAG: usize = 3;
/// Maximum number of trends returned.
pub const TOP_TRENDS: usize = 5;
/// Length of the daily histogram, ending today.
pub const TREND_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSettings {
    pub min_posts: usize,
    pub top_n: usize,
    pub window_days: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            min_posts: MIN_POSTS_PER_TAG,
            top_n: TOP_TRENDS,
            window_days: TREND_WINDOW_DAYS,
        }
    }
}

struct TagUsage {
    name: String,
    timestamps: Vec<DateTime<Utc>>,
}

/// Compute the top hashtag trends with the default settings.
pub fn compute_trends(posts: &[Post], now: DateTime<Utc>) -> Vec<HashtagTrend> {
    compute_trends_with(posts, now, &TrendSettings::default())
}

/// Compute the top hashtag trends.
///
/// Tags are compared case-insensitively and each post counts once per tag.
/// Tags used in fewer than `min_posts` posts are dropped. Results are sorted
/// by total usage, ties keeping the order in which tags were first seen.
///
/// The sparkline holds one count per calendar day (UTC) from
/// `window_days - 1` days before `now` up to `now`'s own day. The trend is a
/// two-point comparison: `Up` only when today's count is strictly greater
/// than the oldest day's.
pub fn compute_trends_with(
    posts: &[Post],
    now: DateTime<Utc>,
    settings: &TrendSettings,
) -> Vec<HashtagTrend> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut usages: Vec<TagUsage> = Vec::new();

    for post in posts {
        let mut counted = HashSet::new();
        for tag in &post.hashtags {
            let key = normalize_hashtag(tag);
            if !counted.insert(key.clone()) {
                continue;
            }
            let slot = *index.entry(key).or_insert_with(|| {
                usages.push(TagUsage {
                    name: tag.clone(),
                    timestamps: Vec::new(),
                });
                usages.len() - 1
            });
            usages[slot].timestamps.push(post.created_at);
        }
    }

    let window = settings.window_days.max(1);
    let today = now.date_naive();

    let mut trends: Vec<HashtagTrend> = usages
        .into_iter()
        .filter(|usage| usage.timestamps.len() >= settings.min_posts)
        .map(|usage| {
            let mut sparkline = vec![0u32; window];
            for ts in &usage.timestamps {
                let days_ago = (today - ts.date_naive()).num_days();
                if (0..window as i64).contains(&days_ago) {
                    sparkline[window - 1 - days_ago as usize] += 1;
                }
            }

            let trend = if sparkline[window - 1] > sparkline[0] {
                TrendDirection::Up
            } else {
                TrendDirection::Down
            };

            HashtagTrend {
                name: usage.name,
                total_count: usage.timestamps.len(),
                sparkline,
                trend,
            }
        })
        .collect();

    // sort_by is stable, ties keep first-seen order
    trends.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    trends.truncate(settings.top_n);
    trends
}

/// Runs the aggregation over the posts of a [`PostStore`].
pub struct TrendAggregator {
    posts: Arc<dyn PostStore>,
    settings: TrendSettings,
}

impl TrendAggregator {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self::with_settings(posts, TrendSettings::default())
    }

    pub fn with_settings(posts: Arc<dyn PostStore>, settings: TrendSettings) -> Self {
        Self { posts, settings }
    }

    pub fn settings(&self) -> &TrendSettings {
        &self.settings
    }

    pub async fn compute(&self, now: DateTime<Utc>) -> Result<Vec<HashtagTrend>> {
        let posts = self.posts.all_posts().await?;
        let trends = compute_trends_with(&posts, now, &self.settings);
        debug!(
            posts = posts.len(),
            trends = trends.len(),
            "Computed hashtag trends"
        );
        Ok(trends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryPostStore;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn post(id: i64, content: &str, created_at: DateTime<Utc>) -> Post {
        Post::new(id, 1, content, None, created_at)
    }

    #[test]
    fn test_empty_posts_yield_no_trends() {
        assert!(compute_trends(&[], at(2024, 3, 10, 12, 0, 0)).is_empty());
    }

    #[test]
    fn test_posts_without_hashtags_yield_no_trends() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let posts: Vec<Post> = (1..=5).map(|i| post(i, "no tags here", now)).collect();
        assert!(compute_trends(&posts, now).is_empty());
    }

    #[test]
    fn test_three_day_go_scenario() {
        let day0 = at(2024, 3, 8, 9, 0, 0);
        let posts = vec![
            post(1, "#go rocks", day0),
            post(2, "#go again", day0 + Duration::days(1)),
            post(3, "#go!", day0 + Duration::days(2)),
        ];
        let now = day0 + Duration::days(2);

        let trends = compute_trends(&posts, now);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].name, "#go");
        assert_eq!(trends[0].total_count, 3);
        assert_eq!(trends[0].sparkline, vec![0, 0, 0, 0, 1, 1, 1]);
        assert_eq!(trends[0].trend, TrendDirection::Up);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let posts = vec![
            post(1, "#three #two", now),
            post(2, "#three #two", now),
            post(3, "#three", now),
        ];
        let trends = compute_trends(&posts, now);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].name, "#three");
    }

    #[test]
    fn test_tags_fold_case_and_keep_first_casing() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let posts = vec![
            post(1, "#RustLang", now),
            post(2, "#rustlang", now),
            post(3, "#RUSTLANG", now),
        ];
        let trends = compute_trends(&posts, now);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].name, "#RustLang");
        assert_eq!(trends[0].total_count, 3);
    }

    #[test]
    fn test_repeated_tag_counts_once_per_post() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let mut noisy = post(1, "#spam", now);
        noisy.hashtags = vec!["#spam".into(), "#Spam".into(), "#spam".into()];
        let posts = vec![noisy, post(2, "#spam", now)];
        assert!(compute_trends(&posts, now).is_empty());
    }

    #[test]
    fn test_top_five_sorted_with_stable_ties() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let mut posts = Vec::new();
        let mut id = 0;
        // #a..#f with counts 3,4,3,5,3,6; ties broken by first appearance
        for (tag, count) in [("#a", 3), ("#b", 4), ("#c", 3), ("#d", 5), ("#e", 3), ("#f", 6)] {
            for _ in 0..count {
                id += 1;
                posts.push(post(id, tag, now));
            }
        }

        let trends = compute_trends(&posts, now);
        let names: Vec<&str> = trends.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["#f", "#d", "#b", "#a", "#c"]);
    }

    #[test]
    fn test_day_boundaries() {
        let now = at(2024, 3, 10, 8, 0, 0);
        let oldest_start = at(2024, 3, 4, 0, 0, 0);
        let oldest_end = at(2024, 3, 4, 23, 59, 59) + Duration::milliseconds(999);
        let too_old = at(2024, 3, 3, 23, 59, 59);
        let later_today = at(2024, 3, 10, 23, 30, 0);
        let posts = vec![
            post(1, "#edge", oldest_start),
            post(2, "#edge", oldest_end),
            post(3, "#edge", too_old),
            post(4, "#edge", later_today),
        ];

        let trends = compute_trends(&posts, now);
        assert_eq!(trends[0].total_count, 4);
        assert_eq!(trends[0].sparkline, vec![2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(trends[0].trend, TrendDirection::Down);
    }

    #[test]
    fn test_future_posts_fall_outside_window() {
        let now = at(2024, 3, 10, 8, 0, 0);
        let posts = vec![
            post(1, "#soon", now + Duration::days(1)),
            post(2, "#soon", now),
            post(3, "#soon", now),
        ];
        let trends = compute_trends(&posts, now);
        assert_eq!(trends[0].total_count, 3);
        assert_eq!(trends[0].sparkline.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_trend_is_down_when_today_equals_oldest_day() {
        let now = at(2024, 3, 10, 8, 0, 0);
        let posts = vec![
            post(1, "#flat", now - Duration::days(6)),
            post(2, "#flat", now - Duration::days(3)),
            post(3, "#flat", now - Duration::days(3)),
            post(4, "#flat", now),
        ];
        let trends = compute_trends(&posts, now);
        assert_eq!(trends[0].sparkline, vec![1, 0, 0, 2, 0, 0, 1]);
        assert_eq!(trends[0].trend, TrendDirection::Down);
    }

    #[test]
    fn test_output_properties_hold_for_mixed_history() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let tags = ["#a", "#b", "#c", "#d", "#e", "#f", "#g", "#h"];
        let posts: Vec<Post> = (0..120i64)
            .map(|i| {
                let first = tags[(i % 8) as usize];
                let second = tags[((i * 3 + 1) % 8) as usize];
                let created = now - Duration::hours(i * 5);
                post(i + 1, &format!("{} and {}", first, second), created)
            })
            .collect();

        let trends = compute_trends(&posts, now);
        assert!(trends.len() <= TOP_TRENDS);
        assert!(trends.windows(2).all(|w| w[0].total_count >= w[1].total_count));
        for entry in &trends {
            assert!(entry.total_count >= MIN_POSTS_PER_TAG);
            assert_eq!(entry.sparkline.len(), TREND_WINDOW_DAYS);
            assert!(entry.sparkline.iter().sum::<u32>() as usize <= entry.total_count);
            let up = entry.sparkline[6] > entry.sparkline[0];
            assert_eq!(entry.trend == TrendDirection::Up, up);
        }
    }

    #[test]
    fn test_custom_settings() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let posts = vec![post(1, "#solo #pair", now), post(2, "#pair", now)];
        let settings = TrendSettings {
            min_posts: 1,
            top_n: 1,
            window_days: 3,
        };
        let trends = compute_trends_with(&posts, now, &settings);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].name, "#pair");
        assert_eq!(trends[0].sparkline, vec![0, 0, 2]);
    }

    #[tokio::test]
    async fn test_aggregator_reads_post_store() {
        let now = at(2024, 3, 10, 12, 0, 0);
        let store = InMemoryPostStore::with_posts(vec![
            post(1, "#store", now),
            post(2, "#store", now),
            post(3, "#store", now - Duration::days(8)),
        ]);
        let aggregator = TrendAggregator::new(Arc::new(store));

        let trends = aggregator.compute(now).await.unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].total_count, 3);
        assert_eq!(trends[0].sparkline.iter().sum::<u32>(), 2);
    }
}
