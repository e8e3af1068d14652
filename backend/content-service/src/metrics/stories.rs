//! Prometheus metrics for the story lifecycle

use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};

lazy_static! {
    /// Stories created.
    pub static ref STORIES_CREATED_TOTAL: IntCounter = register_int_counter!(
        "stories_created_total",
        "Total stories created"
    )
    .expect("failed to register stories_created_total");

    /// Distinct story views recorded (repeat views are not counted).
    pub static ref STORY_VIEWS_TOTAL: IntCounter = register_int_counter!(
        "story_views_total",
        "Total distinct story views recorded"
    )
    .expect("failed to register story_views_total");

    /// Stories removed by the expiry sweep.
    pub static ref STORIES_EXPIRED_TOTAL: IntCounter = register_int_counter!(
        "stories_expired_total",
        "Total stories removed by the expiry sweep"
    )
    .expect("failed to register stories_expired_total");
}

pub fn record_created() {
    STORIES_CREATED_TOTAL.inc();
}

pub fn record_view() {
    STORY_VIEWS_TOTAL.inc();
}

pub fn record_expired(count: usize) {
    STORIES_EXPIRED_TOTAL.inc_by(count as u64);
}
