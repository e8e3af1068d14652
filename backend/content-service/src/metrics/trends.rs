//! Prometheus metrics for the trend refresh job

use lazy_static::lazy_static;
use prometheus::{register_histogram, register_int_counter_vec, Histogram, IntCounterVec};
use std::time::Duration;

lazy_static! {
    /// Trend refresh runs segmented by result (success/error).
    pub static ref TRENDS_REFRESH_TOTAL: IntCounterVec = register_int_counter_vec!(
        "trends_refresh_total",
        "Total hashtag trend refreshes segmented by result",
        &["result"]
    )
    .expect("failed to register trends_refresh_total");

    /// Time spent computing one trend snapshot.
    pub static ref TRENDS_REFRESH_DURATION_SECONDS: Histogram = register_histogram!(
        "trends_refresh_duration_seconds",
        "Duration of hashtag trend computation",
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    )
    .expect("failed to register trends_refresh_duration_seconds");
}

pub fn record_refresh(result: &str, duration: Duration) {
    TRENDS_REFRESH_TOTAL.with_label_values(&[result]).inc();
    TRENDS_REFRESH_DURATION_SECONDS.observe(duration.as_secs_f64());
}
