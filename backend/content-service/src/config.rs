/// Configuration management for the social content service
///
/// This module handles loading and managing configuration from environment
/// variables (optionally populated from a `.env` file by the binary).
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::services::trends::{TrendSettings, MIN_POSTS_PER_TAG, TOP_TRENDS, TREND_WINDOW_DAYS};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Hashtag trend configuration
    pub trends: TrendsConfig,
    /// Seed data configuration
    pub seed: SeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Hashtag trend aggregation and refresh cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendsConfig {
    pub refresh_interval_secs: u64,
    pub min_posts: usize,
    pub top_n: usize,
    pub window_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON file with users, posts and stories loaded at startup
    pub path: Option<String>,
}

impl TrendsConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl From<&TrendsConfig> for TrendSettings {
    fn from(config: &TrendsConfig) -> Self {
        TrendSettings {
            min_posts: config.min_posts,
            top_n: config.top_n,
            window_days: config.window_days,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let cors = {
            let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
                Some(value) => value,
                None if production => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                None => "http://localhost:3000".to_string(),
            };

            if production && allowed_origins.trim() == "*" {
                return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
            }

            CorsConfig { allowed_origins }
        };

        let trends = TrendsConfig {
            refresh_interval_secs: parse_or_default(&lookup, "TRENDS_REFRESH_INTERVAL_SECS", 300)?,
            min_posts: parse_or_default(&lookup, "TRENDS_MIN_POSTS", MIN_POSTS_PER_TAG)?,
            top_n: parse_or_default(&lookup, "TRENDS_TOP_N", TOP_TRENDS)?,
            window_days: parse_or_default(&lookup, "TRENDS_WINDOW_DAYS", TREND_WINDOW_DAYS)?,
        };
        if trends.refresh_interval_secs == 0 {
            return Err("TRENDS_REFRESH_INTERVAL_SECS must be positive".to_string());
        }
        if trends.window_days == 0 {
            return Err("TRENDS_WINDOW_DAYS must be positive".to_string());
        }
        if trends.top_n == 0 {
            return Err("TRENDS_TOP_N must be positive".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: lookup("CONTENT_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or_default(&lookup, "CONTENT_SERVICE_PORT", 8081)?,
            },
            cors,
            trends,
            seed: SeedConfig {
                path: lookup("SEED_DATA_PATH").filter(|p| !p.trim().is_empty()),
            },
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        None => Ok(default),
    }
}
