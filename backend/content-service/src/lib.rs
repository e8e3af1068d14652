/// Social Content Library
///
/// Hashtag trend aggregation and the story lifecycle for a social feed,
/// served over HTTP against injected in-memory stores.
///
/// # Modules
///
/// - `services`: trend aggregation, story lifecycle, posts, comments, users
/// - `db`: store traits and their in-memory implementations
/// - `models`: posts, stories, profiles and trend entries
/// - `handlers`: HTTP request handlers
/// - `jobs`: periodic trend refresh
/// - `cache`: latest trend snapshot
/// - `error`: error types and handling
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
