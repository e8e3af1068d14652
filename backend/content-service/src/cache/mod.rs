/// Content caching layer
///
/// This module provides:
/// - An in-process snapshot of the latest hashtag trends, written by the
///   refresh job and read by the HTTP layer
pub mod trends_cache;

pub use trends_cache::{TrendSnapshot, TrendsCache};
